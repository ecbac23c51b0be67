//! Store configuration
//!
//! Loaded from a TOML file, then overridden from the environment
//! (`COURSEREG_DB_PATH`, `COURSEREG_LOG_PROFILE`). A `.env` file in the
//! working directory is read first if present.

use crate::errors::{config_error, io_error, Result};
use coursereg_core::logging_facility::Profile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "coursereg.toml";

pub const ENV_DB_PATH: &str = "COURSEREG_DB_PATH";
pub const ENV_LOG_PROFILE: &str = "COURSEREG_LOG_PROFILE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file, or `:memory:`
    pub path: PathBuf,
    /// How long a writer waits for the store lock before failing
    pub busy_timeout_ms: u64,
    pub foreign_keys: bool,
    pub journal_mode: JournalMode,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".coursereg/store.db"),
            busy_timeout_ms: 5000,
            foreign_keys: true,
            journal_mode: JournalMode::Wal,
        }
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(crate::db::MEMORY_PATH),
            journal_mode: JournalMode::Memory,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "development" or "production"
    pub profile: Option<String>,
}

impl LoggingConfig {
    /// # Errors
    /// `Configuration` if the profile name is unknown.
    pub fn profile(&self) -> Result<Profile> {
        match &self.profile {
            None => Ok(Profile::default()),
            Some(name) => name.parse::<Profile>().map_err(config_error),
        }
    }
}

impl StoreConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid TOML: {}", e)))
    }

    /// Load from an explicit file; the file must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| io_error("read_config", e))?;
        Self::from_toml_str(&content)
    }

    /// Resolve the effective config
    ///
    /// An explicit path must exist. Without one, `coursereg.toml` in the
    /// working directory is used if present, else defaults. Environment
    /// overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.is_empty()) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(profile) = lookup(ENV_LOG_PROFILE).filter(|p| !p.is_empty()) {
            self.logging.profile = Some(profile);
        }
    }
}
