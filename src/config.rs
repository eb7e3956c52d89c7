//! Configuration types for exiforge

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination-naming strategy, chosen once per invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrganizeMode {
    /// Destination is `<extension>/<date>/` under the target directory
    #[default]
    ByDate,
    /// Destination is `<model>/<extension>/<date>/` under the target directory
    ByModelThenDate,
}

/// Configuration for one organizing run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File extension labels to process, matched case-insensitively
    pub extensions: Vec<String>,

    /// Directory to scan for candidate files
    pub directory: PathBuf,

    /// Destination-naming strategy
    pub mode: OrganizeMode,

    /// Verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec!["JPG".into(), "ARW".into()],
            directory: PathBuf::from("."),
            mode: OrganizeMode::default(),
            verbose: false,
        }
    }
}

impl Config {
    /// Extension labels normalized for matching and output naming:
    /// trimmed, uppercased, empty entries dropped.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.trim().to_uppercase())
            .filter(|e| !e.is_empty())
            .collect()
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }
}
