use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::frequency::WateringFrequency;
use crate::models::notification::{NewNotification, Notification, NotificationKind, Priority};
use crate::models::plant::{NewPlant, Plant};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Timestamps are stored as RFC 3339 UTC text, so that lexical order
/// matches chronological order.
pub fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn ts_from_db(idx: usize, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(raw.to_string())),
            )
        })
}

fn conversion_error(idx: usize, what: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        Box::new(AppError::Validation(what)),
    )
}

// ---------------------------------------------------------------------------
// Plants
// ---------------------------------------------------------------------------

pub fn map_plant(row: &Row) -> Result<Plant> {
    let frequency: Option<String> = row.get("watering_frequency")?;
    let last_watered: Option<String> = row.get("last_watered")?;
    let date_added: String = row.get("date_added")?;

    Ok(Plant {
        id: row.get("id")?,
        name: row.get("name")?,
        species: row.get("species")?,
        frequency: WateringFrequency::from_stored(frequency.as_deref()),
        last_watered: last_watered.as_deref().map(|s| ts_from_db(4, s)).transpose()?,
        date_added: ts_from_db(5, &date_added)?,
        image_ref: row.get("image_ref")?,
        identification: row.get("identification")?,
        notes: row.get("notes")?,
    })
}

pub fn insert_plant(conn: &Connection, plant: &NewPlant) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO plants (name, species, watering_frequency, last_watered,
                             date_added, image_ref, identification, notes)
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6, ?7)",
        params![
            plant.name,
            plant.species,
            plant.frequency.to_db_str(),
            ts_to_db(&plant.date_added),
            plant.image_ref,
            plant.identification,
            plant.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All plants, most recently added first.
pub fn load_plants(pool: &mut DbPool) -> AppResult<Vec<Plant>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM plants
         ORDER BY date_added DESC, id DESC",
    )?;

    let rows = stmt.query_map([], map_plant)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_plant(conn: &Connection, id: i64) -> AppResult<Option<Plant>> {
    let plant = conn
        .query_row("SELECT * FROM plants WHERE id = ?1", [id], map_plant)
        .optional()?;
    Ok(plant)
}

pub fn mark_watered(conn: &Connection, id: i64, at: &DateTime<Utc>) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE plants SET last_watered = ?1 WHERE id = ?2",
        params![ts_to_db(at), id],
    )?;

    if changed == 0 {
        return Err(AppError::PlantNotFound(id));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

pub fn map_notification(row: &Row) -> Result<Notification> {
    let kind_str: String = row.get("kind")?;
    let kind = NotificationKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(3, format!("Invalid notification kind: {}", kind_str)))?;

    let prio_str: String = row.get("priority")?;
    let priority = Priority::from_db_str(&prio_str)
        .ok_or_else(|| conversion_error(8, format!("Invalid priority: {}", prio_str)))?;

    let timestamp: String = row.get("timestamp")?;

    Ok(Notification {
        id: row.get("id")?,
        plant_id: row.get("plant_id")?,
        plant_name: row.get("plant_name")?,
        kind,
        title: row.get("title")?,
        message: row.get("message")?,
        timestamp: ts_from_db(6, &timestamp)?,
        read: row.get::<_, i32>("read")? == 1,
        priority,
    })
}

pub fn has_unread_watering(conn: &Connection, plant_id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM notifications
         WHERE plant_id = ?1 AND kind = 'watering' AND read = 0
         LIMIT 1",
    )?;
    Ok(stmt.exists([plant_id])?)
}

/// Insert a notification. Returns `false` when the unique index on unread
/// watering notifications rejected it as a duplicate.
pub fn insert_notification(conn: &Connection, n: &NewNotification) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO notifications
             (plant_id, plant_name, kind, title, message, timestamp, read, priority)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
        params![
            n.plant_id,
            n.plant_name,
            n.kind.to_db_str(),
            n.title,
            n.message,
            ts_to_db(&n.timestamp),
            n.priority.to_db_str(),
        ],
    )?;
    Ok(changed == 1)
}

/// Notifications, newest first.
pub fn load_notifications(pool: &mut DbPool, unread_only: bool) -> AppResult<Vec<Notification>> {
    let sql = if unread_only {
        "SELECT * FROM notifications WHERE read = 0 ORDER BY timestamp DESC, id DESC"
    } else {
        "SELECT * FROM notifications ORDER BY timestamp DESC, id DESC"
    };

    let mut stmt = pool.conn.prepare(sql)?;
    let rows = stmt.query_map([], map_notification)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn mark_notification_read(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("UPDATE notifications SET read = 1 WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotificationNotFound(id));
    }
    Ok(())
}

/// Delete every notification. Returns the number of deleted rows.
pub fn clear_notifications(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM notifications", [])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use chrono::{Duration, TimeZone};

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn plants_are_listed_newest_first() {
        let mut pool = pool();
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();

        for (i, name) in ["Rose", "Monstera", "Basil"].iter().enumerate() {
            let mut p = NewPlant::new(name, "", WateringFrequency::Weekly);
            p.date_added = base + Duration::days(i as i64);
            insert_plant(&pool.conn, &p).unwrap();
        }

        let names: Vec<String> = load_plants(&mut pool)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Basil", "Monstera", "Rose"]);
    }

    #[test]
    fn missing_frequency_reads_as_weekly() {
        let mut pool = pool();
        pool.conn
            .execute(
                "INSERT INTO plants (name, date_added, watering_frequency)
                 VALUES ('Fern', '2025-01-01T00:00:00Z', NULL),
                        ('Cactus', '2025-01-02T00:00:00Z', 'Sometimes')",
                [],
            )
            .unwrap();

        for p in load_plants(&mut pool).unwrap() {
            assert_eq!(p.frequency, WateringFrequency::Weekly);
            assert!(p.last_watered.is_none());
        }
    }

    #[test]
    fn mark_watered_updates_and_reports_missing_rows() {
        let pool = pool();
        let id = insert_plant(
            &pool.conn,
            &NewPlant::new("Rose", "Rosa", WateringFrequency::Daily),
        )
        .unwrap();

        let at = Utc.with_ymd_and_hms(2025, 5, 2, 9, 30, 0).unwrap();
        mark_watered(&pool.conn, id, &at).unwrap();
        let plant = load_plant(&pool.conn, id).unwrap().unwrap();
        assert_eq!(plant.last_watered, Some(at));

        assert!(matches!(
            mark_watered(&pool.conn, 999, &at),
            Err(AppError::PlantNotFound(999))
        ));
    }

    #[test]
    fn store_rejects_second_unread_watering_notification() {
        let mut pool = pool();
        let now = Utc::now();

        let reminder = NewNotification::watering(1, "Rose", now);
        assert!(insert_notification(&pool.conn, &reminder).unwrap());
        assert!(!insert_notification(&pool.conn, &reminder).unwrap());
        assert!(has_unread_watering(&pool.conn, 1).unwrap());

        let first = load_notifications(&mut pool, false).unwrap()[0].id;
        mark_notification_read(&pool.conn, first).unwrap();
        assert!(!has_unread_watering(&pool.conn, 1).unwrap());

        // once read, a new reminder may be created
        assert!(insert_notification(&pool.conn, &reminder).unwrap());
        assert_eq!(load_notifications(&mut pool, false).unwrap().len(), 2);
        assert_eq!(load_notifications(&mut pool, true).unwrap().len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut pool = pool();
        let now = Utc::now();
        insert_notification(&pool.conn, &NewNotification::watering(1, "Rose", now)).unwrap();
        insert_notification(&pool.conn, &NewNotification::watering(2, "Fern", now)).unwrap();

        assert_eq!(clear_notifications(&pool.conn).unwrap(), 2);
        assert!(load_notifications(&mut pool, false).unwrap().is_empty());
        assert!(matches!(
            mark_notification_read(&pool.conn, 1),
            Err(AppError::NotificationNotFound(1))
        ));
    }
}
