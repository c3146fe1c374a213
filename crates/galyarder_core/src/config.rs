//! Runtime configuration from `GALYARDER_*` environment variables.
//!
//! | Variable               | Default                         |
//! |------------------------|---------------------------------|
//! | `GALYARDER_DB_PATH`    | `<temp dir>/galyarder.sqlite3`  |
//! | `GALYARDER_LOG_LEVEL`  | `default_log_level()`           |
//! | `GALYARDER_LOG_DIR`    | unset (file logging disabled)   |
//! | `GALYARDER_STRICT`     | `false`                         |

use crate::logging::{default_log_level, normalize_level};
use crate::store::entity_store::StoreOptions;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "GALYARDER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "GALYARDER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GALYARDER_LOG_DIR";
pub const ENV_STRICT: &str = "GALYARDER_STRICT";

const DEFAULT_DB_FILE_NAME: &str = "galyarder.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        variable: &'static str,
        value: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { variable, value } => {
                write!(f, "invalid value `{value}` for {variable}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
    pub strict_not_found: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
            strict_not_found: false,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(|_| ConfigError::InvalidValue {
                variable: ENV_LOG_LEVEL,
                value: level.clone(),
            })?;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        if let Some(strict) = read(ENV_STRICT) {
            config.strict_not_found = parse_flag(&strict).ok_or(ConfigError::InvalidValue {
                variable: ENV_STRICT,
                value: strict,
            })?;
        }

        Ok(config)
    }

    /// Store options implied by this configuration.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::default().strict(self.strict_not_found)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_DB_PATH, ENV_LOG_LEVEL, ENV_STRICT};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        CoreConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]).unwrap(), CoreConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            (ENV_DB_PATH, "/data/life.db"),
            (ENV_LOG_LEVEL, "Warning"),
            (ENV_STRICT, "yes"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/life.db"));
        assert_eq!(config.log_level, "warn");
        assert!(config.strict_not_found);
        assert!(config.store_options().strict_not_found);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            config_from(&[(ENV_STRICT, "maybe")]),
            Err(ConfigError::InvalidValue { variable: ENV_STRICT, .. })
        ));
        assert!(config_from(&[(ENV_LOG_LEVEL, "loud")]).is_err());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(ENV_DB_PATH, "   ")]).unwrap();
        assert_eq!(config.db_path, CoreConfig::default().db_path);
    }
}
