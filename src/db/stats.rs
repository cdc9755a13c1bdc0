use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) PLANTS
    //
    let plants: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM plants", [], |row| row.get(0))?;
    let never_watered: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM plants WHERE last_watered IS NULL",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Plants:{} {}{}{}", CYAN, RESET, GREEN, plants, RESET);
    println!("    never watered: {}", never_watered);

    //
    // 3) NOTIFICATIONS
    //
    let (total, unread): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN read = 0 THEN 1 ELSE 0 END), 0)
         FROM notifications",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!(
        "{}• Notifications:{} {}{}{} ({} unread)",
        CYAN, RESET, GREEN, total, RESET, unread
    );

    //
    // 4) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT date_added FROM plants ORDER BY date_added ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT date_added FROM plants ORDER BY date_added DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Plants added:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
