use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::schedule::schedule_for;
use crate::db::queries::load_plants;
use crate::db::subscription::subscribe_plants;
use crate::errors::AppResult;
use crate::models::health::HealthTier;
use crate::models::plant::Plant;
use crate::utils::colors::{RESET, color_for_health, colorize_optional};
use crate::utils::formatting::truncate;
use crate::utils::table::{Column, Table};
use crate::utils::{describe_days_until, describe_last_watered};
use chrono::{DateTime, Utc};
use std::time::Duration;

const FOLLOW_POLL: Duration = Duration::from_secs(2);

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { due, follow } = cmd {
        let mut pool = open_db(cfg)?;

        if !*follow {
            let plants = load_plants(&mut pool)?;
            print_plants(&plants, *due, Utc::now());
            return Ok(());
        }

        let sub = subscribe_plants(&cfg.database, FOLLOW_POLL)?;
        while let Some(plants) = sub.recv() {
            // clear screen, cursor home
            print!("\x1b[2J\x1b[H");
            print_plants(&plants, *due, Utc::now());
        }
    }
    Ok(())
}

pub(crate) fn render_plants(
    plants: &[Plant],
    due_only: bool,
    now: DateTime<Utc>,
) -> Option<String> {
    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("Name", 20),
        Column::new("Species", 24),
        Column::new("Frequency", 10),
        Column::new("Last watered", 12),
        Column::new("Next watering", 14),
        Column::new("Health", 7),
    ]);

    for p in plants {
        let s = schedule_for(p, now);
        if due_only && !s.is_due() {
            continue;
        }

        table.add_row(vec![
            p.id.to_string(),
            truncate(&p.name, 20),
            colorize_optional(&truncate(&p.species, 24)),
            p.frequency.to_string(),
            describe_last_watered(p.last_watered),
            describe_days_until(s.days_until_watering),
            format!("{}{}{}", color_for_health(s.health), s.health, RESET),
        ]);
    }

    if table.rows.is_empty() {
        None
    } else {
        Some(table.render())
    }
}

/// Collection header counts. "Need water" looks one day ahead, so it
/// includes plants that are not due yet.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CollectionStats {
    pub total: usize,
    pub need_water: usize,
    pub need_care: usize,
}

pub(crate) fn collection_stats(plants: &[Plant], now: DateTime<Utc>) -> CollectionStats {
    plants.iter().fold(CollectionStats::default(), |mut acc, p| {
        let s = schedule_for(p, now);
        acc.total += 1;
        if s.days_until_watering <= 1 {
            acc.need_water += 1;
        }
        if s.health != HealthTier::Good {
            acc.need_care += 1;
        }
        acc
    })
}

fn print_plants(plants: &[Plant], due_only: bool, now: DateTime<Utc>) {
    match render_plants(plants, due_only, now) {
        Some(out) => {
            let stats = collection_stats(plants, now);
            println!(
                "🪴 {} plant(s) · 💧 {} need water · 🩺 {} need care\n",
                stats.total, stats.need_water, stats.need_care
            );
            print!("{}", out)
        }
        None if due_only => println!("🌿 No plants need watering right now."),
        None => println!("🪴 No plants yet. Add one with `ecopot add --name <NAME>`."),
    }
}
