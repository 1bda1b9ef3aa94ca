//! Runtime configuration resolved from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `EVENTSPROJECT_DB_PATH` | `eventsproject.sqlite3` |
//! | `EVENTSPROJECT_LOG_LEVEL` | [`default_log_level`] |
//! | `EVENTSPROJECT_LOG_DIR` | unset (file logging disabled) |

use crate::logging::{default_log_level, init_logging};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "EVENTSPROJECT_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "EVENTSPROJECT_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "EVENTSPROJECT_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "eventsproject.sqlite3";

/// Settings needed to bootstrap the core from a binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            db_path: get(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: get(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: get(LOG_DIR_ENV),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging stays disabled.
    pub fn init_logging(&self) -> Result<bool, String> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> CoreConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), CoreConfig::default());
    }

    #[test]
    fn environment_values_override_defaults() {
        let config = config_from(&[
            (DB_PATH_ENV, "/var/lib/events.db"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/events"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/events.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/events"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = config_from(&[(DB_PATH_ENV, "  "), (LOG_DIR_ENV, "")]);
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn logging_stays_disabled_without_directory() {
        assert_eq!(CoreConfig::default().init_logging(), Ok(false));
    }
}
