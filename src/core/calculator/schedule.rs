//! Watering schedule derivation: days until the next watering and the
//! health tier shown next to each plant.

use crate::models::frequency::WateringFrequency;
use crate::models::health::HealthTier;
use crate::models::plant::Plant;
use chrono::{DateTime, Utc};
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WateringSchedule {
    /// `None` when the plant has never been watered.
    pub days_since_watered: Option<i64>,
    pub interval_days: i64,
    pub days_until_watering: i64,
    pub health: HealthTier,
}

impl WateringSchedule {
    pub fn is_due(&self) -> bool {
        self.days_until_watering <= 0
    }
}

/// Whole days elapsed between `last_watered` and `now`, rounded down.
pub fn days_since(last_watered: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_watered)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

pub fn health_for(days_until_watering: i64) -> HealthTier {
    if days_until_watering <= 0 {
        HealthTier::Danger
    } else if days_until_watering <= 1 {
        HealthTier::Warning
    } else {
        HealthTier::Good
    }
}

pub fn calculate_schedule(
    last_watered: Option<DateTime<Utc>>,
    frequency: WateringFrequency,
    now: DateTime<Utc>,
) -> WateringSchedule {
    let interval_days = frequency.interval_days();

    let (days_since_watered, days_until_watering) = match last_watered {
        // never watered → due immediately
        None => (None, 0),
        Some(ts) => {
            // a timestamp ahead of `now` (clock skew) counts as just watered
            let d = days_since(ts, now).max(0);
            (Some(d), (interval_days - d).max(0))
        }
    };

    WateringSchedule {
        days_since_watered,
        interval_days,
        days_until_watering,
        health: health_for(days_until_watering),
    }
}

pub fn schedule_for(plant: &Plant, now: DateTime<Utc>) -> WateringSchedule {
    calculate_schedule(plant.last_watered, plant.frequency, now)
}
