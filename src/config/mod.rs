//! Ledger configuration
//!
//! Loaded from a JSON file. Every field has a default, so a partial file
//! (or none at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GeonoiseError, Result};

/// Default ledger file name.
pub const DEFAULT_LEDGER_FILE: &str = "ledger.json";

/// Settings for a [`NoiseLedger`](crate::ledger::NoiseLedger).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Path of the JSON ledger file.
    pub ledger_path: PathBuf,

    /// Upper bound on stored records. `None` means unlimited.
    pub max_records: Option<usize>,

    /// Write the ledger file as indented JSON.
    pub pretty: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_FILE),
            max_records: None,
            pretty: true,
        }
    }
}

impl LedgerConfig {
    /// Default configuration pointing at the given ledger file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            ledger_path: path.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| GeonoiseError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: LedgerConfig = serde_json::from_str(&content)?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
