//! Formatting utilities used for CLI outputs.

use chrono::{DateTime, Local, Utc};
use regex::Regex;
use std::sync::LazyLock;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

pub fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// Width in characters once colour codes are removed.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// "Due today", "Tomorrow" or "In N days".
pub fn describe_days_until(days: i64) -> String {
    match days {
        d if d <= 0 => "Due today".to_string(),
        1 => "Tomorrow".to_string(),
        d => format!("In {} days", d),
    }
}

/// Local calendar date of the last watering, or "Never".
pub fn describe_last_watered(last: Option<DateTime<Utc>>) -> String {
    last.map(|t| t.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Never".to_string())
}

/// Truncate to `max` visible characters, ending with "…" when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_until_wording() {
        assert_eq!(describe_days_until(0), "Due today");
        assert_eq!(describe_days_until(1), "Tomorrow");
        assert_eq!(describe_days_until(12), "In 12 days");
        assert_eq!(describe_last_watered(None), "Never");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Monstera", 20), "Monstera");
        assert_eq!(truncate("Fiddle Leaf Fig", 8), "Fiddle …");
    }
}
