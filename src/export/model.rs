// src/export/model.rs

use crate::core::calculator::schedule::schedule_for;
use crate::models::plant::Plant;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Flat row written by `export`: the stored plant plus its computed schedule.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PlantExport {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub watering_frequency: String,
    pub last_watered: String,
    pub date_added: String,
    pub days_until_watering: i64,
    pub health: String,
    pub notes: String,
}

impl PlantExport {
    pub fn from_plant(plant: &Plant, now: DateTime<Utc>) -> Self {
        let schedule = schedule_for(plant, now);

        Self {
            id: plant.id,
            name: plant.name.clone(),
            species: plant.species.clone(),
            watering_frequency: plant.frequency.to_db_str().to_string(),
            last_watered: plant
                .last_watered
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default(),
            date_added: plant.date_added.to_rfc3339_opts(SecondsFormat::Secs, true),
            days_until_watering: schedule.days_until_watering,
            health: schedule.health.as_str().to_string(),
            notes: plant.notes.clone(),
        }
    }
}
