use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const OP_WIDTH: usize = 60;

/// ANSI colour for each logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "water" => Colour::Cyan,
        "notify" => Colour::Yellow,
        "read" | "clear" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        other if other.ends_with("_failed") || other.ends_with("_fallback") => Colour::Red,
        _ => Colour::White,
    }
}

/// Truncate the visible text to `OP_WIDTH` and colour only the operation word.
fn render_op_target(operation: &str, target: &str) -> String {
    let color = color_for_operation(operation);

    let visible = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let visible = if visible.chars().count() > OP_WIDTH {
        let mut s: String = visible.chars().take(OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    let colored = match visible.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(visible.as_str()).to_string(),
    };

    // padding is computed on the visible width, without escape codes
    let padding = " ".repeat(OP_WIDTH.saturating_sub(strip_ansi(&colored).chars().count()));
    format!("{colored}{padding}")
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: Option<String> = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target.unwrap_or_default(), message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in entries {
            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                id,
                date,
                render_op_target(&operation, &target),
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_targets_are_truncated_on_visible_width() {
        let target = "x".repeat(100);
        let rendered = render_op_target("backup", &target);
        let visible = strip_ansi(&rendered);

        assert_eq!(visible.chars().count(), OP_WIDTH);
        assert!(visible.ends_with("..."));
        assert!(visible.starts_with("backup ("));
    }

    #[test]
    fn short_entries_are_padded() {
        let visible = strip_ansi(&render_op_target("notify", "plant#3"));
        assert_eq!(visible.trim_end(), "notify (plant#3)");
        assert_eq!(visible.chars().count(), OP_WIDTH);
    }
}
