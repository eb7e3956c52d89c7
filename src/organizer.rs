//! Batch file organization engine
//!
//! Handles the core logic of:
//! - Enumerating candidate files for one extension group
//! - Mapping extracted capture metadata to a destination directory
//! - Moving each file, isolating per-file failures from the batch

use crate::config::OrganizeMode;
use crate::error::{Error, Result};
use crate::exif::MetadataExtractor;
use crate::progress::ProgressSink;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A single file that could not be organized
#[derive(Debug)]
pub struct FileFailure {
    /// Original location of the file; the file is still there.
    pub path: PathBuf,
    /// The per-file cause.
    pub error: Error,
}

/// Outcome of one extension-group batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Normalized (uppercase) extension label of this batch
    pub extension: String,
    /// Number of candidate files handled, successes and failures alike
    pub processed: usize,
    /// Files that failed, each with its cause
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    /// Number of files that ended up at their destination
    pub fn moved(&self) -> usize {
        self.processed - self.failures.len()
    }
}

/// Organizes the files of one extension group per call.
///
/// Destinations are derived from capture metadata supplied by the
/// extractor: `<EXT>/<date>/` in date mode, `<model>/<EXT>/<date>/` in
/// model mode, relative to the scanned directory.
pub struct Organizer<E> {
    extractor: E,
}

impl<E: MetadataExtractor> Organizer<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    /// Move every `*.<label>` file in `base_dir` into its derived folder.
    ///
    /// Returns `Err` only when the batch as a whole cannot proceed: the
    /// directory cannot be enumerated, or the date-mode output root cannot
    /// be created. Every other failure is recorded against its file in the
    /// report and processing continues with the next file.
    pub fn organize_batch(
        &self,
        base_dir: &Path,
        extension_label: &str,
        mode: OrganizeMode,
        progress: &mut dyn ProgressSink,
    ) -> Result<BatchReport> {
        let label = extension_label.trim().to_uppercase();
        let files = collect_extension_group(base_dir, &label)?;

        let output_root = match mode {
            OrganizeMode::ByDate => {
                let root = base_dir.join(&label);
                fs::create_dir_all(&root).map_err(|e| Error::OutputRoot {
                    path: root.clone(),
                    source: e,
                })?;
                root
            }
            // Per-file subdirectories are created lazily since each file's
            // model is unknown until inspected.
            OrganizeMode::ByModelThenDate => base_dir.to_path_buf(),
        };

        let mut report = BatchReport {
            extension: label.clone(),
            ..BatchReport::default()
        };

        if files.is_empty() {
            info!(
                directory = %base_dir.display(),
                extension = %label,
                "No files found"
            );
            return Ok(report);
        }

        progress.begin(files.len(), &label);

        for file in files {
            match self.organize_file(&file, &output_root, &label, mode) {
                Ok(destination) => {
                    debug!(
                        source = %file.display(),
                        destination = %destination.display(),
                        "Moved file"
                    );
                }
                Err(error) => {
                    warn!(path = %file.display(), %error, "Failed to organize file");
                    report.failures.push(FileFailure { path: file, error });
                }
            }
            report.processed += 1;
            progress.advance();
        }

        progress.finish();
        Ok(report)
    }

    /// Handle a single candidate file; any `Err` is terminal for this file
    /// within the batch but invisible to every other file.
    fn organize_file(
        &self,
        file: &Path,
        output_root: &Path,
        label: &str,
        mode: OrganizeMode,
    ) -> Result<PathBuf> {
        let subpath = match mode {
            OrganizeMode::ByModelThenDate => {
                let model = normalize_model(&self.extractor.extract_model(file)?);
                if model.is_empty() {
                    return Err(Error::EmptyModel {
                        path: file.to_path_buf(),
                    });
                }
                let date = self.extractor.extract_date(file)?;
                PathBuf::from(model).join(label).join(date)
            }
            OrganizeMode::ByDate => PathBuf::from(self.extractor.extract_date(file)?),
        };

        let dest_dir = output_root.join(subpath);
        fs::create_dir_all(&dest_dir).map_err(|e| Error::CreateDir {
            path: dest_dir.clone(),
            source: e,
        })?;

        let file_name = file.file_name().ok_or_else(|| Error::Move {
            from: file.to_path_buf(),
            to: dest_dir.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file has no name component",
            ),
        })?;

        let destination = dest_dir.join(file_name);

        // rename() would silently replace an existing destination on most
        // platforms; with no undo support a collision must stay recoverable
        // per file, never clobber.
        if destination.exists() {
            return Err(Error::Move {
                from: file.to_path_buf(),
                to: destination,
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "destination already exists",
                ),
            });
        }

        fs::rename(file, &destination).map_err(|e| Error::Move {
            from: file.to_path_buf(),
            to: destination.clone(),
            source: e,
        })?;

        Ok(destination)
    }
}

/// Normalize a raw camera model value into a folder name: surrounding
/// quote characters are trimmed, every space becomes an underscore.
fn normalize_model(raw: &str) -> String {
    raw.trim().trim_matches('"').replace(' ', "_")
}

/// Enumerate the direct children of `base_dir` whose extension matches
/// `label` case-insensitively. Enumeration order is whatever the
/// filesystem returns.
fn collect_extension_group(base_dir: &Path, label: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(base_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| Error::Scan {
            dir: base_dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if path.is_file()
            && let Some(ext) = path.extension().and_then(|e| e.to_str())
            && ext.eq_ignore_ascii_case(label)
        {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use std::fs;
    use tempfile::TempDir;

    /// Deterministic stand-in for the EXIF extractor
    struct StubExtractor {
        date: Option<&'static str>,
        model: Option<&'static str>,
        /// File names for which `extract_date` is forced to fail
        fail_date_for: Vec<&'static str>,
    }

    impl StubExtractor {
        fn with_date(date: &'static str) -> Self {
            Self {
                date: Some(date),
                model: None,
                fail_date_for: Vec::new(),
            }
        }

        fn with_model_and_date(model: &'static str, date: &'static str) -> Self {
            Self {
                date: Some(date),
                model: Some(model),
                fail_date_for: Vec::new(),
            }
        }
    }

    impl MetadataExtractor for StubExtractor {
        fn extract_date(&self, path: &Path) -> Result<String> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if self.fail_date_for.contains(&name) {
                return Err(Error::TagAbsent {
                    path: path.to_path_buf(),
                    tag: "DateTimeOriginal",
                });
            }
            self.date.map(str::to_string).ok_or_else(|| Error::TagAbsent {
                path: path.to_path_buf(),
                tag: "DateTimeOriginal",
            })
        }

        fn extract_model(&self, path: &Path) -> Result<String> {
            self.model.map(str::to_string).ok_or_else(|| Error::TagAbsent {
                path: path.to_path_buf(),
                tag: "Model",
            })
        }
    }

    fn run(
        base: &Path,
        extractor: StubExtractor,
        label: &str,
        mode: OrganizeMode,
    ) -> Result<BatchReport> {
        Organizer::new(extractor).organize_batch(base, label, mode, &mut NullProgress)
    }

    #[test]
    fn empty_batch_is_not_an_error() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("notes.txt"), b"x").expect("write");

        let report = run(
            temp.path(),
            StubExtractor::with_date("2025-03-08"),
            "JPG",
            OrganizeMode::ByDate,
        )
        .expect("empty batch succeeds");

        assert_eq!(report.processed, 0);
        assert!(report.failures.is_empty());

        // Date mode pre-creates the output root, which stays childless
        let root = temp.path().join("JPG");
        assert!(root.is_dir());
        assert_eq!(fs::read_dir(&root).expect("read root").count(), 0);
    }

    #[test]
    fn empty_model_batch_mutates_nothing() {
        let temp = TempDir::new().expect("tempdir");

        let report = run(
            temp.path(),
            StubExtractor::with_model_and_date("Cam", "2025-03-08"),
            "JPG",
            OrganizeMode::ByModelThenDate,
        )
        .expect("empty batch succeeds");

        assert_eq!(report.processed, 0);
        assert_eq!(fs::read_dir(temp.path()).expect("read dir").count(), 0);
    }

    #[test]
    fn date_mode_moves_file_into_ext_date_folder() {
        let temp = TempDir::new().expect("tempdir");
        let original = temp.path().join("test.JPG");
        fs::write(&original, b"image").expect("write");

        let report = run(
            temp.path(),
            StubExtractor::with_date("2025-03-08"),
            "JPG",
            OrganizeMode::ByDate,
        )
        .expect("batch succeeds");

        assert_eq!(report.processed, 1);
        assert_eq!(report.moved(), 1);
        assert!(!original.exists());
        assert!(temp.path().join("JPG/2025-03-08/test.JPG").is_file());
    }

    #[test]
    fn model_mode_moves_file_into_model_ext_date_folder() {
        let temp = TempDir::new().expect("tempdir");
        let original = temp.path().join("test.JPG");
        fs::write(&original, b"image").expect("write");

        let report = run(
            temp.path(),
            StubExtractor::with_model_and_date("Test Camera", "2025-03-08"),
            "JPG",
            OrganizeMode::ByModelThenDate,
        )
        .expect("batch succeeds");

        assert_eq!(report.moved(), 1);
        assert!(!original.exists());
        assert!(
            temp.path()
                .join("Test_Camera/JPG/2025-03-08/test.JPG")
                .is_file()
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_label_is_normalized() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("a.jpg"), b"x").expect("write");
        fs::write(temp.path().join("b.JPG"), b"x").expect("write");

        let report = run(
            temp.path(),
            StubExtractor::with_date("2025-03-08"),
            "jpg",
            OrganizeMode::ByDate,
        )
        .expect("batch succeeds");

        assert_eq!(report.extension, "JPG");
        assert_eq!(report.moved(), 2);
        assert!(temp.path().join("JPG/2025-03-08/a.jpg").is_file());
        assert!(temp.path().join("JPG/2025-03-08/b.JPG").is_file());
    }

    #[test]
    fn one_failing_file_does_not_abort_the_batch() {
        let temp = TempDir::new().expect("tempdir");
        for name in ["a.JPG", "b.JPG", "c.JPG"] {
            fs::write(temp.path().join(name), b"x").expect("write");
        }

        let extractor = StubExtractor {
            date: Some("2025-03-08"),
            model: None,
            fail_date_for: vec!["b.JPG"],
        };
        let report = run(temp.path(), extractor, "JPG", OrganizeMode::ByDate)
            .expect("batch completes despite the failure");

        assert_eq!(report.processed, 3);
        assert_eq!(report.moved(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("b.JPG"));
        assert!(matches!(report.failures[0].error, Error::TagAbsent { .. }));

        // The failing file stays where it was; the others moved
        assert!(temp.path().join("b.JPG").exists());
        assert!(temp.path().join("JPG/2025-03-08/a.JPG").is_file());
        assert!(temp.path().join("JPG/2025-03-08/c.JPG").is_file());
    }

    #[test]
    fn pre_existing_destination_directory_is_not_an_error() {
        let temp = TempDir::new().expect("tempdir");
        fs::create_dir_all(temp.path().join("JPG/2025-03-08")).expect("mkdir");
        fs::write(temp.path().join("test.JPG"), b"x").expect("write");

        let report = run(
            temp.path(),
            StubExtractor::with_date("2025-03-08"),
            "JPG",
            OrganizeMode::ByDate,
        )
        .expect("batch succeeds");

        assert_eq!(report.moved(), 1);
        assert!(temp.path().join("JPG/2025-03-08/test.JPG").is_file());
    }

    #[test]
    fn destination_filename_collision_is_recoverable() {
        let temp = TempDir::new().expect("tempdir");
        let occupied = temp.path().join("JPG/2025-03-08/test.JPG");
        fs::create_dir_all(occupied.parent().unwrap()).expect("mkdir");
        fs::write(&occupied, b"from a prior run").expect("write");
        fs::write(temp.path().join("test.JPG"), b"new").expect("write");

        let report = run(
            temp.path(),
            StubExtractor::with_date("2025-03-08"),
            "JPG",
            OrganizeMode::ByDate,
        )
        .expect("collision must not be fatal");

        assert_eq!(report.processed, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0].error, Error::Move { .. }));

        // Neither file was touched
        assert_eq!(fs::read(temp.path().join("test.JPG")).expect("read"), b"new");
        assert_eq!(fs::read(&occupied).expect("read"), b"from a prior run");
    }

    #[test]
    fn empty_model_after_normalization_fails_the_file() {
        let temp = TempDir::new().expect("tempdir");
        let original = temp.path().join("test.JPG");
        fs::write(&original, b"x").expect("write");

        let report = run(
            temp.path(),
            StubExtractor::with_model_and_date("\"\"", "2025-03-08"),
            "JPG",
            OrganizeMode::ByModelThenDate,
        )
        .expect("batch completes");

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0].error, Error::EmptyModel { .. }));
        assert!(original.exists());
    }

    #[test]
    fn missing_base_directory_is_fatal() {
        let err = run(
            Path::new("/nonexistent/exiforge-test"),
            StubExtractor::with_date("2025-03-08"),
            "JPG",
            OrganizeMode::ByDate,
        )
        .expect_err("enumeration failure is fatal");

        assert!(matches!(err, Error::Scan { .. }));
    }

    #[test]
    fn normalize_model_trims_quotes_and_replaces_spaces() {
        assert_eq!(normalize_model("\"Canon EOS\""), "Canon_EOS");
        assert_eq!(normalize_model("Test Camera"), "Test_Camera");
        assert_eq!(normalize_model("ILCE-7M3"), "ILCE-7M3");
        assert_eq!(normalize_model("\"\""), "");
    }
}
