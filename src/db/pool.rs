//! SQLite connection wrapper (one connection per command or worker thread).

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

/// The watcher, live subscriptions and the CLI may hold connections to the
/// same file at once; writers wait this long for the lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    /// Private in-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}
