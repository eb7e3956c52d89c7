//! CLI argument parsing with clap

use crate::config::{Config, OrganizeMode};
use clap::Parser;
use std::path::PathBuf;

/// Organize pictures using EXIF data
///
/// Organizes picture files by capture date and optionally by camera model
/// based on EXIF metadata. Each configured extension is processed as one
/// batch; failures on individual files are logged and do not stop the run.
#[derive(Parser, Debug)]
#[command(name = "exiforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Comma-separated list of file extensions to process, e.g. JPG,DNG,PNG
    /// [default: JPG,ARW]
    #[arg(short, long)]
    pub extensions: Option<String>,

    /// Directory to process [default: current directory]
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Use camera model from EXIF for file organization
    #[arg(short, long)]
    pub model: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Merge CLI arguments with config from file.
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref extensions) = self.extensions {
            config.extensions = extensions.split(',').map(|e| e.trim().to_string()).collect();
        }
        if let Some(ref directory) = self.directory {
            config.directory = directory.clone();
        }
        if self.model {
            config.mode = OrganizeMode::ByModelThenDate;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}
