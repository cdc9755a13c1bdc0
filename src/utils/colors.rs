/// ANSI color helper utilities for terminal output.
use crate::models::health::HealthTier;
use crate::models::notification::Priority;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// good → green, warning → yellow, danger → red
pub fn color_for_health(tier: HealthTier) -> &'static str {
    match tier {
        HealthTier::Good => GREEN,
        HealthTier::Warning => YELLOW,
        HealthTier::Danger => RED,
    }
}

pub fn color_for_priority(priority: Priority) -> &'static str {
    match priority {
        Priority::High => RED,
        Priority::Medium => YELLOW,
        Priority::Low => BLUE,
    }
}

/// Grey out empty values, leave the rest untouched.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
