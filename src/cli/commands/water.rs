use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::schedule::schedule_for;
use crate::core::water::WaterLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::parse_watered_at;
use crate::utils::describe_days_until;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Water { id, at } = cmd {
        let at = match at {
            Some(s) => parse_watered_at(s)?,
            None => Utc::now(),
        };

        let mut pool = open_db(cfg)?;
        let plant = WaterLogic::apply(&mut pool, *id, at)?;
        let schedule = schedule_for(&plant, Utc::now());

        success(format!(
            "'{}' watered. Next watering: {}.",
            plant.name,
            describe_days_until(schedule.days_until_watering).to_lowercase()
        ));
    }
    Ok(())
}
