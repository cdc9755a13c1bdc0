use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `plants` table.
fn create_plants_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS plants (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            name                TEXT NOT NULL,
            species             TEXT NOT NULL DEFAULT '',
            watering_frequency  TEXT,
            last_watered        TEXT,
            date_added          TEXT NOT NULL,
            image_ref           TEXT,
            identification      TEXT,
            notes               TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_plants_date_added ON plants(date_added);
        "#,
    )?;
    Ok(())
}

/// Create the `notifications` table.
fn create_notifications_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            plant_id    INTEGER NOT NULL,
            plant_name  TEXT NOT NULL DEFAULT '',
            kind        TEXT NOT NULL CHECK(kind IN ('watering','fertilizer','light','health')),
            title       TEXT NOT NULL,
            message     TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            read        INTEGER NOT NULL DEFAULT 0,
            priority    TEXT NOT NULL DEFAULT 'high' CHECK(priority IN ('high','medium','low'))
        );

        CREATE INDEX IF NOT EXISTS idx_notifications_timestamp ON notifications(timestamp);
        CREATE INDEX IF NOT EXISTS idx_notifications_plant ON notifications(plant_id, kind, read);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn backup_before_migration(db_path: &str, label: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let io_err = |what: &str, e: String| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed ({}): {}",
            what, e
        ))))
    };

    let backup_name = format!("{}-backup_db_{}.zip", Local::now().format("%Y%m%d_%H%M%S"), label);

    let Some(parent) = std::path::Path::new(db_path).parent() else {
        warning("Could not determine DB directory, backup skipped.");
        return Ok(());
    };
    let backup_path = parent.join(&backup_name);

    let file = File::create(&backup_path).map_err(|e| io_err("create", e.to_string()))?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| io_err("start_file", e.to_string()))?;

    let db_content = fs::read(db_path).map_err(|e| io_err("read", e.to_string()))?;

    zip.write_all(&db_content)
        .map_err(|e| io_err("write_all", e.to_string()))?;

    zip.finish().map_err(|e| io_err("finish", e.to_string()))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Enforce "one unread watering notification per plant" at the store level.
///
/// Older databases may already hold duplicates (created by two overlapping
/// runs); those are collapsed onto the oldest row before the index is built.
fn migrate_unique_unread_watering(conn: &Connection) -> Result<(), Error> {
    let version = "20251018_0002_unique_unread_watering";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let duplicates: i64 = conn.query_row(
        "SELECT COUNT(*) FROM notifications n
         WHERE n.kind = 'watering' AND n.read = 0
           AND EXISTS (
               SELECT 1 FROM notifications o
               WHERE o.plant_id = n.plant_id AND o.kind = 'watering'
                 AND o.read = 0 AND o.id < n.id
           )",
        [],
        |row| row.get(0),
    )?;

    if duplicates > 0 {
        warning(format!(
            "Found {} duplicate unread watering notifications, creating safety backup...",
            duplicates
        ));

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if !db_path.is_empty() {
            backup_before_migration(&db_path, "pre_unique_watering")?;
        } else {
            warning("Could not determine DB path, backup skipped.");
        }

        conn.execute(
            "DELETE FROM notifications
             WHERE kind = 'watering' AND read = 0
               AND id NOT IN (
                   SELECT MIN(id) FROM notifications
                   WHERE kind = 'watering' AND read = 0
                   GROUP BY plant_id
               )",
            [],
        )?;
    }

    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_notifications_unread_watering
         ON notifications(plant_id) WHERE kind = 'watering' AND read = 0;",
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to create unread-watering index: {}", e)),
        )
    })?;

    mark_applied(
        conn,
        version,
        "Unique index on unread watering notifications",
    )?;

    success(format!("Migration applied: {}", version));
    Ok(())
}

/// Notifications created before `plant_name` existed only carried the plant id.
fn migrate_add_plant_name_column(conn: &Connection) -> Result<(), Error> {
    let version = "20251018_0001_add_plant_name";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "notifications", "plant_name")? {
        conn.execute_batch(
            r#"
            ALTER TABLE notifications ADD COLUMN plant_name TEXT NOT NULL DEFAULT '';
            UPDATE notifications
               SET plant_name = COALESCE(
                   (SELECT name FROM plants WHERE plants.id = notifications.plant_id),
                   ''
               );
            "#,
        )?;
        success("'plant_name' column added to notifications.");
    }

    mark_applied(conn, version, "Added plant_name to notifications")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "plants")? {
        create_plants_table(conn)?;
        success("Created plants table.");
    }

    if !table_exists(conn, "notifications")? {
        create_notifications_table(conn)?;
        success("Created notifications table.");
    }

    migrate_add_plant_name_column(conn)?;
    migrate_unique_unread_watering(conn)?;

    Ok(())
}
