//! EXIF metadata extraction for images
//!
//! The organizer consumes metadata only through the [`MetadataExtractor`]
//! trait, so tests can substitute a deterministic stand-in without touching
//! any image bytes.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// Timestamp layout of the EXIF DateTimeOriginal tag
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Folder-name layout for capture dates
const DATE_FOLDER_FORMAT: &str = "%Y-%m-%d";

/// Capture-metadata source for a single file.
///
/// `extract_date` returns the capture date already reformatted as
/// `YYYY-MM-DD`; `extract_model` returns the raw camera model value, which
/// the organizer normalizes into a folder name.
pub trait MetadataExtractor {
    /// Extract the capture date of `path` as `YYYY-MM-DD`.
    fn extract_date(&self, path: &Path) -> Result<String>;

    /// Extract the raw camera model string of `path`.
    fn extract_model(&self, path: &Path) -> Result<String>;
}

/// Extractor backed by the EXIF container of the file itself
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifExtractor;

impl ExifExtractor {
    fn read_exif(&self, path: &Path) -> Result<exif::Exif> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        Reader::new()
            .read_from_container(&mut reader)
            .map_err(|e| Error::ExifRead {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

impl MetadataExtractor for ExifExtractor {
    fn extract_date(&self, path: &Path) -> Result<String> {
        let exif = self.read_exif(path)?;
        let field = exif
            .get_field(Tag::DateTimeOriginal, In::PRIMARY)
            .ok_or_else(|| Error::TagAbsent {
                path: path.to_path_buf(),
                tag: "DateTimeOriginal",
            })?;

        let raw = field.display_value().to_string();
        trace!(?path, %raw, "Found EXIF capture date");

        reformat_capture_date(&raw).ok_or_else(|| Error::TimestampParse {
            path: path.to_path_buf(),
            raw,
            message: format!("expected {EXIF_DATETIME_FORMAT}"),
        })
    }

    fn extract_model(&self, path: &Path) -> Result<String> {
        let exif = self.read_exif(path)?;
        let field = exif
            .get_field(Tag::Model, In::PRIMARY)
            .ok_or_else(|| Error::TagAbsent {
                path: path.to_path_buf(),
                tag: "Model",
            })?;

        Ok(field.display_value().to_string())
    }
}

/// Reformat a raw EXIF datetime ("YYYY:MM:DD HH:MM:SS", possibly quoted) as
/// a `YYYY-MM-DD` folder name. Returns `None` when the value does not match
/// the EXIF layout.
fn reformat_capture_date(raw: &str) -> Option<String> {
    let s = raw.trim().trim_matches('"');
    NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT)
        .ok()
        .map(|dt| dt.format(DATE_FOLDER_FORMAT).to_string())
}
