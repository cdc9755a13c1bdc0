use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Same as [`ttlog`], but a failure only produces a warning on stderr:
/// the operation being logged already happened.
pub fn ttlog_quiet(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, operation, target, message) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    #[test]
    fn writes_row_and_quiet_variant_survives_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        ttlog_quiet(&conn, "water", "1", "no log table yet");

        init_db(&conn).unwrap();
        ttlog(&conn, "water", "1", "Watered 'Fern'").unwrap();

        let (op, target): (String, String) = conn
            .query_row(
                "SELECT operation, target FROM log WHERE message = 'Watered ''Fern'''",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(op, "water");
        assert_eq!(target, "1");
    }
}
