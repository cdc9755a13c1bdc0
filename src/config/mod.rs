use crate::errors::{AppError, AppResult};
use crate::models::frequency::WateringFrequency;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

pub const APP_DIR: &str = "ecopot";
pub const CONFIG_FILE: &str = "ecopot.conf";
pub const DATABASE_FILE: &str = "ecopot.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub default_frequency: WateringFrequency,
    #[serde(default = "default_notify_interval")]
    pub notify_interval_minutes: u64,
    #[serde(default)]
    pub plant_id: PlantIdConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub mqtt: MqttConfig,
}

/// plant.id identification and health assessment API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantIdConfig {
    #[serde(default = "default_plant_id_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

/// OpenAI-compatible chat completion endpoint used by `ask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_chat_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Broker feeding the sensor dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    #[serde(default = "default_mqtt_host")]
    pub host: String,
    #[serde(default = "default_mqtt_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_topic_prefix")]
    pub topic_prefix: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_notify_interval() -> u64 {
    60
}
fn default_plant_id_endpoint() -> String {
    "https://api.plant.id/v2".to_string()
}
fn default_chat_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}
fn default_chat_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}
fn default_max_tokens() -> u32 {
    300
}
fn default_temperature() -> f32 {
    0.7
}
fn default_mqtt_host() -> String {
    "localhost".to_string()
}
fn default_mqtt_port() -> u16 {
    1883
}
fn default_topic_prefix() -> String {
    "plant/".to_string()
}

impl Default for PlantIdConfig {
    fn default() -> Self {
        Self {
            endpoint: default_plant_id_endpoint(),
            api_key: String::new(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_chat_endpoint(),
            api_key: String::new(),
            model: default_chat_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: default_mqtt_host(),
            port: default_mqtt_port(),
            username: None,
            password: None,
            topic_prefix: default_topic_prefix(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_frequency: WateringFrequency::default(),
            notify_interval_minutes: default_notify_interval(),
            plant_id: PlantIdConfig::default(),
            chat: ChatConfig::default(),
            mqtt: MqttConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join(APP_DIR)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(format!(".{}", APP_DIR))
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;

        // an empty file is a valid YAML null, treat it as "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(&content)?)
    }

    /// Initialize configuration and database files.
    ///
    /// Returns the database path written to the configuration.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join(DATABASE_FILE),
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if !is_test {
            fs::create_dir_all(&dir)?;

            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Default::default()
            };

            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_conf(name: &str, content: &str) -> PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("{}_ecopot.conf", name));
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = Config::load_from(Path::new("/definitely/not/here/ecopot.conf")).unwrap();
        assert_eq!(cfg.notify_interval_minutes, 60);
        assert_eq!(cfg.mqtt.port, 1883);
        assert_eq!(cfg.mqtt.topic_prefix, "plant/");
        assert_eq!(cfg.chat.model, "llama-3.3-70b-versatile");
        assert!(cfg.database.ends_with(DATABASE_FILE));
    }

    #[test]
    fn partial_file_is_completed_with_defaults() {
        let p = temp_conf(
            "partial",
            "database: /tmp/garden.sqlite\ndefault_frequency: Bi-weekly\nmqtt:\n  host: broker.local\n",
        );
        let cfg = Config::load_from(&p).unwrap();

        assert_eq!(cfg.database, "/tmp/garden.sqlite");
        assert_eq!(cfg.default_frequency, WateringFrequency::BiWeekly);
        assert_eq!(cfg.mqtt.host, "broker.local");
        assert_eq!(cfg.mqtt.port, 1883);
        assert_eq!(cfg.plant_id.endpoint, "https://api.plant.id/v2");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let p = temp_conf("malformed", "database: [unclosed\n");
        assert!(matches!(
            Config::load_from(&p),
            Err(AppError::ConfigParse(_))
        ));
    }
}
