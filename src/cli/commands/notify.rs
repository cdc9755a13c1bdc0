use crate::cli::commands::open_db;
use crate::config::Config;
use crate::core::notify::{GenerationReport, NotificationGenerator};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::Utc;

pub(crate) fn print_report(report: &GenerationReport) {
    if report.created > 0 {
        success(format!(
            "{} new watering reminder(s) created ({} plant(s) due).",
            report.created, report.due
        ));
    } else {
        info(format!(
            "No new reminders: {} plant(s) checked, {} due, {} already notified.",
            report.checked, report.due, report.already_notified
        ));
    }
}

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(cfg)?;
    let report = NotificationGenerator::run(&mut pool, Utc::now())?;
    print_report(&report);
    Ok(())
}
