use super::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde_str;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Export {
        format,
        file,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = open_db(cfg)?;
    let target = expand_tilde_str(file);
    let count = ExportLogic::export(&mut pool, *format, &target, *force, Utc::now())?;

    if count > 0 {
        info(format!("{} plant(s) written with their watering schedule.", count));
    }

    Ok(())
}
