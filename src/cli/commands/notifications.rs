use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::notify::NotificationGenerator;
use crate::core::watch::{self, WatchHandle, interval_from_minutes};
use crate::db::log::ttlog;
use crate::db::queries::{clear_notifications, load_notifications, mark_notification_read};
use crate::db::subscription::subscribe_notifications;
use crate::errors::AppResult;
use crate::models::notification::Notification;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREY, RESET, color_for_priority};
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::time::Duration;

const FOLLOW_POLL: Duration = Duration::from_secs(2);

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Notifications {
        unread,
        read,
        clear,
        yes,
        follow,
    } = cmd
    {
        let mut pool = open_db(cfg)?;

        // opening the list refreshes due reminders first
        NotificationGenerator::run(&mut pool, Utc::now())?;

        if let Some(id) = read {
            mark_notification_read(&pool.conn, *id)?;
            ttlog(&pool.conn, "read", &format!("notification#{}", id), "Marked as read")?;
            success(format!("Notification {} marked as read.", id));
            return Ok(());
        }

        if *clear {
            if !*yes && !ask_confirmation("Delete all notifications? [y/N]: ")? {
                warning("Clear cancelled.");
                return Ok(());
            }
            let n = clear_notifications(&pool.conn)?;
            ttlog(&pool.conn, "clear", "notifications", &format!("Deleted {} notifications", n))?;
            success(format!("Deleted {} notification(s).", n));
            return Ok(());
        }

        if !*follow {
            let list = load_notifications(&mut pool, *unread)?;
            print_notifications(&list, Utc::now());
            return Ok(());
        }

        // the rescan lives exactly as long as the followed list
        let rescan = start_rescan(cfg)?;
        let sub = subscribe_notifications(&cfg.database, FOLLOW_POLL, *unread)?;
        while let Some(list) = sub.recv() {
            print!("\x1b[2J\x1b[H");
            print_notifications(&list, Utc::now());
        }
        rescan.stop()?;
    }
    Ok(())
}

/// Periodic generator run for the followed list, every
/// `notify_interval_minutes`. The first pass runs right away.
pub(crate) fn start_rescan(cfg: &Config) -> AppResult<WatchHandle> {
    let period = interval_from_minutes(cfg.notify_interval_minutes)?;
    watch::spawn(&cfg.database, period, None)
}

fn ask_confirmation(prompt: &str) -> AppResult<bool> {
    print!("{}", prompt);
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// "just now", "5m ago", "3h ago", "2d ago"
pub(crate) fn relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - ts).num_seconds().max(0);
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3600),
        s => format!("{}d ago", s / 86_400),
    }
}

pub(crate) fn render_notification(n: &Notification, now: DateTime<Utc>) -> String {
    let marker = if n.read { " " } else { "●" };
    let color = if n.read { GREY } else { color_for_priority(n.priority) };

    format!(
        "{color}{marker}{RESET} #{:<4} {} {}{}{}  {GREY}{}{RESET}\n        {}",
        n.id,
        n.kind.icon(),
        color,
        n.title,
        RESET,
        relative_time(n.timestamp, now),
        n.message,
    )
}

fn print_notifications(list: &[Notification], now: DateTime<Utc>) {
    if list.is_empty() {
        info("No notifications.");
        return;
    }

    let unread = list.iter().filter(|n| !n.read).count();
    println!("🔔 Notifications ({} unread)\n", unread);

    for n in list {
        println!("{}", render_notification(n, now));
    }
}
