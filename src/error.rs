//! Error types for exiforge

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for exiforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for exiforge
///
/// The organizer returns `Err` only for batch-fatal conditions (`Scan`,
/// `OutputRoot`); every other variant shows up as a per-file failure inside
/// a batch report.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to scan directory {dir}: {source}")]
    Scan {
        dir: PathBuf,
        source: walkdir::Error,
    },

    #[error("Failed to create output root {path}: {source}")]
    OutputRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("No {tag} tag in EXIF data of {path}")]
    TagAbsent { path: PathBuf, tag: &'static str },

    #[error("Failed to parse timestamp {raw:?} from {path}: {message}")]
    TimestampParse {
        path: PathBuf,
        raw: String,
        message: String,
    },

    #[error("Camera model of {path} is empty after normalization")]
    EmptyModel { path: PathBuf },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
