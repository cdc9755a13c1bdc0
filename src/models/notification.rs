use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Watering,
    Fertilizer,
    Light,
    Health,
}

impl NotificationKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            NotificationKind::Watering => "watering",
            NotificationKind::Fertilizer => "fertilizer",
            NotificationKind::Light => "light",
            NotificationKind::Health => "health",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "watering" => Some(NotificationKind::Watering),
            "fertilizer" => Some(NotificationKind::Fertilizer),
            "light" => Some(NotificationKind::Light),
            "health" => Some(NotificationKind::Health),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Watering => "💧",
            NotificationKind::Fertilizer => "🍃",
            NotificationKind::Light => "☀️",
            NotificationKind::Health => "🩺",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: i64,
    pub plant_id: i64, // weak reference, no cascade
    pub plant_name: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub priority: Priority,
}

/// A notification about to be written by the generator.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub plant_id: i64,
    pub plant_name: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub priority: Priority,
}

impl NewNotification {
    /// Templated "water your plant" notification.
    pub fn watering(plant_id: i64, plant_name: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            plant_id,
            plant_name: plant_name.to_string(),
            kind: NotificationKind::Watering,
            title: format!("Water your {}", plant_name),
            message: format!("Your {} needs watering today", plant_name),
            timestamp,
            priority: Priority::High,
        }
    }
}
