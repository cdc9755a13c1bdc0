use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// User-declared watering interval category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum WateringFrequency {
    Daily,
    #[default]
    Weekly,
    #[serde(rename = "Bi-weekly")]
    #[value(name = "bi-weekly", alias = "biweekly")]
    BiWeekly,
    Monthly,
}

impl WateringFrequency {
    /// Interval in days between two waterings.
    pub fn interval_days(&self) -> i64 {
        match self {
            WateringFrequency::Daily => 1,
            WateringFrequency::Weekly => 7,
            WateringFrequency::BiWeekly => 14,
            WateringFrequency::Monthly => 30,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WateringFrequency::Daily => "Daily",
            WateringFrequency::Weekly => "Weekly",
            WateringFrequency::BiWeekly => "Bi-weekly",
            WateringFrequency::Monthly => "Monthly",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Daily" => Some(WateringFrequency::Daily),
            "Weekly" => Some(WateringFrequency::Weekly),
            "Bi-weekly" => Some(WateringFrequency::BiWeekly),
            "Monthly" => Some(WateringFrequency::Monthly),
            _ => None,
        }
    }

    /// Stored values are free text in older rows: anything missing or
    /// unrecognised reads as Weekly.
    pub fn from_stored(s: Option<&str>) -> Self {
        s.and_then(Self::from_db_str).unwrap_or_default()
    }
}

impl std::fmt::Display for WateringFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_match_frequency_table() {
        assert_eq!(WateringFrequency::Daily.interval_days(), 1);
        assert_eq!(WateringFrequency::Weekly.interval_days(), 7);
        assert_eq!(WateringFrequency::BiWeekly.interval_days(), 14);
        assert_eq!(WateringFrequency::Monthly.interval_days(), 30);
    }

    #[test]
    fn unknown_or_missing_values_read_as_weekly() {
        assert_eq!(WateringFrequency::from_stored(None), WateringFrequency::Weekly);
        assert_eq!(
            WateringFrequency::from_stored(Some("Fortnightly")),
            WateringFrequency::Weekly
        );
        assert_eq!(
            WateringFrequency::from_stored(Some("Bi-weekly")),
            WateringFrequency::BiWeekly
        );
    }
}
