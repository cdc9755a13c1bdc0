//! Configuration file upgrades: detect keys that newer versions added and
//! write them back with their default values, leaving user values untouched.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn defaults() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;

    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
    }
}

/// Walk `defaults` and add to `target` every key it lacks. Nested sections
/// are completed one key at a time. Returns the dotted names of added keys.
fn fill_missing(target: &mut Mapping, defaults: &Mapping, prefix: &str) -> Vec<String> {
    let mut added = Vec::new();

    for (key, default) in defaults {
        let name = match key.as_str() {
            Some(k) if prefix.is_empty() => k.to_string(),
            Some(k) => format!("{}.{}", prefix, k),
            None => continue,
        };

        match target.get_mut(key) {
            None => {
                target.insert(key.clone(), default.clone());
                added.push(name);
            }
            Some(Value::Mapping(existing)) => {
                if let Value::Mapping(nested) = default {
                    added.extend(fill_missing(existing, nested, &name));
                }
            }
            Some(_) => {}
        }
    }

    added
}

/// List the keys missing from the configuration file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    Ok(fill_missing(&mut current, &defaults()?, ""))
}

/// Add missing keys (with default values) to the file at `path`.
/// Returns the keys that were written; the file is left alone when none are.
pub fn migrate_file(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let added = fill_missing(&mut current, &defaults()?, "");

    if !added.is_empty() {
        fs::write(path, serde_yaml::to_string(&Value::Mapping(current))?)?;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn temp_conf(name: &str, content: &str) -> PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("{}_ecopot_migrate.conf", name));
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn reports_missing_top_level_and_nested_keys() {
        let p = temp_conf("missing", "database: /tmp/x.sqlite\nmqtt:\n  host: pi.local\n");
        let missing = missing_keys(&p).unwrap();

        assert!(missing.contains(&"notify_interval_minutes".to_string()));
        assert!(missing.contains(&"chat".to_string()));
        assert!(missing.contains(&"mqtt.port".to_string()));
        assert!(!missing.contains(&"database".to_string()));
        assert!(!missing.contains(&"mqtt.host".to_string()));
    }

    #[test]
    fn migration_keeps_user_values_and_is_idempotent() {
        let p = temp_conf("idempotent", "database: /tmp/x.sqlite\nmqtt:\n  host: pi.local\n");

        let added = migrate_file(&p).unwrap();
        assert!(!added.is_empty());

        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.mqtt.host, "pi.local");

        assert!(migrate_file(&p).unwrap().is_empty());
        assert!(missing_keys(&p).unwrap().is_empty());
    }
}
