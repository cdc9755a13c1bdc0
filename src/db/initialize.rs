use crate::db::migrate::{run_pending_migrations, table_exists};
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

const REQUIRED_TABLES: [&str; 3] = ["log", "plants", "notifications"];

/// Bring the schema up to date and make sure every table the app reads
/// is present afterwards.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(AppError::Migration(format!(
                "table '{}' is missing after migrations",
                table
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_gets_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        init_db(&conn).unwrap();

        for t in REQUIRED_TABLES {
            assert!(table_exists(&conn, t).unwrap());
        }
    }
}
