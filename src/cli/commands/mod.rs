pub mod add;
pub mod ask;
pub mod backup;
pub mod care;
pub mod config;
pub mod db;
pub mod diagnose;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod notifications;
pub mod notify;
pub mod sensors;
pub mod watch;
pub mod water;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use std::fs;
use std::path::Path;

/// Open the configured database, bringing its schema up to date first.
/// The containing directory is created when missing.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    if let Some(dir) = Path::new(&cfg.database).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
