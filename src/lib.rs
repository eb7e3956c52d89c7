//! exiforge - Organize pictures using EXIF data
//!
//! This library organizes picture files by capture date and optionally by
//! camera model, based on EXIF metadata:
//! - One batch pass per configured file extension
//! - Destinations derived from the DateTimeOriginal and Model tags
//! - Per-file failures are logged and isolated from the rest of the batch

pub mod cli;
pub mod config;
pub mod error;
pub mod exif;
pub mod organizer;
pub mod progress;

pub use cli::Cli;
pub use config::{Config, OrganizeMode};
pub use error::{Error, Result};
pub use exif::{ExifExtractor, MetadataExtractor};
pub use organizer::{BatchReport, FileFailure, Organizer};
pub use progress::{ConsoleProgress, NullProgress, ProgressSink};
