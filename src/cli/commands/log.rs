use super::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Log { print } = cmd else {
        return Ok(());
    };

    if !*print {
        info("Nothing to do. Use `ecopot log --print` to show the internal log.");
        return Ok(());
    }

    let mut pool = open_db(cfg)?;
    LogLogic::print_log(&mut pool)
}
