use super::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde_str;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Backup { file, compress } = cmd else {
        return Ok(());
    };

    let mut pool = open_db(cfg)?;
    let dest = expand_tilde_str(file);

    let written = BackupLogic::backup(&mut pool, cfg, &dest, *compress)?;
    if let Some(path) = written.filter(|_| *compress) {
        info(format!("Compressed archive: {}", path.display()));
    }

    Ok(())
}
