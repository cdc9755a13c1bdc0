use super::frequency::WateringFrequency;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plant {
    pub id: i64,                               // ⇔ plants.id (assigned by the store)
    pub name: String,                          // ⇔ plants.name
    pub species: String,                       // ⇔ plants.species
    pub frequency: WateringFrequency,          // ⇔ plants.watering_frequency (NULL → Weekly)
    pub last_watered: Option<DateTime<Utc>>,   // ⇔ plants.last_watered (NULL = never)
    pub date_added: DateTime<Utc>,             // ⇔ plants.date_added
    pub image_ref: Option<String>,             // ⇔ plants.image_ref
    pub identification: Option<String>,        // ⇔ plants.identification (JSON)
    pub notes: String,                         // ⇔ plants.notes
}

/// Input of the "add plant" flow, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub species: String,
    pub frequency: WateringFrequency,
    pub image_ref: Option<String>,
    pub identification: Option<String>,
    pub notes: String,
    pub date_added: DateTime<Utc>,
}

impl NewPlant {
    pub fn new(name: &str, species: &str, frequency: WateringFrequency) -> Self {
        Self {
            name: name.trim().to_string(),
            species: species.trim().to_string(),
            frequency,
            image_ref: None,
            identification: None,
            notes: String::new(),
            date_added: Utc::now(),
        }
    }
}
