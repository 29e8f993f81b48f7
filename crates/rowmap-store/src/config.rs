//! Store configuration
//!
//! ```toml
//! path = "app.db"       # omit for an in-memory database
//! foreign_keys = true
//! wal = false
//! naming = "snake_case" # or "verbatim"
//! log_profile = "development"
//! ```

use crate::errors::{config_error, Result};
use rowmap_core::logging_facility::Profile;
use rowmap_core::naming::NamingStrategy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings applied when opening a [`crate::db::Database`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file; `None` opens an in-memory database
    pub path: Option<PathBuf>,
    pub foreign_keys: bool,
    /// Switch file databases to WAL journaling
    pub wal: bool,
    pub naming: NamingStrategy,
    /// Initialise the logging facility with this profile on open
    pub log_profile: Option<Profile>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            foreign_keys: true,
            wal: false,
            naming: NamingStrategy::default(),
            log_profile: None,
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn at_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(&e.to_string()))
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| config_error(&format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }
}
