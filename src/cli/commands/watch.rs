use crate::cli::commands::notify::print_report;
use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::watch::{interval_from_minutes, run_loop};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use chrono::Local;
use std::sync::mpsc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { interval, runs } = cmd {
        let minutes = interval.unwrap_or(cfg.notify_interval_minutes);
        let period = interval_from_minutes(minutes)?;
        if *runs == Some(0) {
            return Err(AppError::Validation("--runs must be at least 1".into()));
        }

        let mut pool = open_db(cfg)?;

        info(format!(
            "Checking watering schedules every {} minute(s). Press Ctrl+C to stop.",
            minutes
        ));

        // the loop only ends on its run limit; Ctrl+C ends the process
        let (_stop_tx, stop_rx) = mpsc::channel::<()>();

        let done = run_loop(
            &mut pool,
            period,
            *runs,
            &stop_rx,
            |n, report| {
                println!("[{}] check #{}", Local::now().format("%Y-%m-%d %H:%M:%S"), n);
                print_report(report);
            },
        );

        info(format!("Completed {} check(s).", done));
    }
    Ok(())
}
