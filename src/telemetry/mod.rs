//! Sensor dashboard state fed by the six `plant/*` telemetry topics.

pub mod mqtt;

use std::fmt;

const PLACEHOLDER: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorTopic {
    Temperature,
    Humidity,
    Moisture,
    Light,
    Air,
    Water,
}

impl SensorTopic {
    pub const ALL: [SensorTopic; 6] = [
        SensorTopic::Temperature,
        SensorTopic::Humidity,
        SensorTopic::Moisture,
        SensorTopic::Light,
        SensorTopic::Air,
        SensorTopic::Water,
    ];

    /// Topic suffix after the configured prefix.
    pub fn suffix(&self) -> &'static str {
        match self {
            SensorTopic::Temperature => "temperature",
            SensorTopic::Humidity => "humidity",
            SensorTopic::Moisture => "moisture",
            SensorTopic::Light => "light",
            SensorTopic::Air => "air",
            SensorTopic::Water => "water",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SensorTopic::Temperature => "Temperature",
            SensorTopic::Humidity => "Humidity",
            SensorTopic::Moisture => "Moisture",
            SensorTopic::Light => "Light",
            SensorTopic::Air => "Air Quality",
            SensorTopic::Water => "Water Level",
        }
    }

    pub fn topic(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.suffix())
    }

    /// Match a full topic name such as `plant/moisture`.
    pub fn from_topic(topic: &str, prefix: &str) -> Option<Self> {
        let suffix = topic.strip_prefix(prefix)?;
        Self::ALL.into_iter().find(|t| t.suffix() == suffix)
    }

    /// Render a raw payload the way the dashboard shows it.
    pub fn format_value(&self, payload: &str) -> String {
        let v = payload.trim();
        match self {
            SensorTopic::Temperature => format!("{}°C", v),
            SensorTopic::Humidity | SensorTopic::Moisture => format!("{}%", v),
            SensorTopic::Light | SensorTopic::Air | SensorTopic::Water => v.to_string(),
        }
    }
}

/// Latest value received on each topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorReadings {
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub moisture: Option<String>,
    pub light: Option<String>,
    pub air: Option<String>,
    pub water: Option<String>,
}

impl SensorReadings {
    fn slot(&mut self, topic: SensorTopic) -> &mut Option<String> {
        match topic {
            SensorTopic::Temperature => &mut self.temperature,
            SensorTopic::Humidity => &mut self.humidity,
            SensorTopic::Moisture => &mut self.moisture,
            SensorTopic::Light => &mut self.light,
            SensorTopic::Air => &mut self.air,
            SensorTopic::Water => &mut self.water,
        }
    }

    pub fn get(&self, topic: SensorTopic) -> Option<&str> {
        match topic {
            SensorTopic::Temperature => self.temperature.as_deref(),
            SensorTopic::Humidity => self.humidity.as_deref(),
            SensorTopic::Moisture => self.moisture.as_deref(),
            SensorTopic::Light => self.light.as_deref(),
            SensorTopic::Air => self.air.as_deref(),
            SensorTopic::Water => self.water.as_deref(),
        }
    }

    /// Apply one message. Returns the matched topic, or `None` when the
    /// topic is not one of ours (the message is ignored).
    pub fn apply(&mut self, topic: &str, payload: &str, prefix: &str) -> Option<SensorTopic> {
        let t = SensorTopic::from_topic(topic, prefix)?;
        *self.slot(t) = Some(t.format_value(payload));
        Some(t)
    }

    /// Parse a `"<topic> <payload>"` line, as read from a stdin feed.
    pub fn apply_line(&mut self, line: &str, prefix: &str) -> Option<SensorTopic> {
        let (topic, payload) = line.trim().split_once(char::is_whitespace)?;
        self.apply(topic, payload, prefix)
    }
}

impl fmt::Display for SensorReadings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in SensorTopic::ALL {
            writeln!(f, "{:<12} {}", t.label(), self.get(t).unwrap_or(PLACEHOLDER))?;
        }
        Ok(())
    }
}
