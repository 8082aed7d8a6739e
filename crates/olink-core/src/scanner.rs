//! Discovery of per-lane input files in a pool folder

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filename suffix of per-lane counts files
pub const COUNTS_SUFFIX: &str = ".olink_counts.csv";

/// Filename suffix of per-lane meta files
pub const META_SUFFIX: &str = ".olink_meta.json";

/// The per-lane input files discovered in one folder
///
/// Both lists are sorted by path, so the combine order (and the "first
/// file" named in mismatch reports) is deterministic.
#[derive(Debug, Clone)]
pub struct DiscoveredInputs {
    /// Folder that was scanned
    pub folder: PathBuf,
    /// Counts files, sorted by path
    pub counts_files: Vec<PathBuf>,
    /// Meta files, sorted by path
    pub meta_files: Vec<PathBuf>,
}

/// Scan a folder (non-recursively) for per-lane counts and meta files
///
/// Fails with `NoInputFiles` if either set comes up empty.
pub fn discover_inputs<P: AsRef<Path>>(folder: P) -> Result<DiscoveredInputs> {
    let folder = folder.as_ref();

    let mut counts_files = Vec::new();
    let mut meta_files = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if name.ends_with(COUNTS_SUFFIX) {
            counts_files.push(path.to_path_buf());
        } else if name.ends_with(META_SUFFIX) {
            meta_files.push(path.to_path_buf());
        }
    }

    counts_files.sort();
    meta_files.sort();

    if counts_files.is_empty() {
        return Err(Error::NoInputFiles {
            pattern: COUNTS_SUFFIX.to_string(),
            folder: folder.to_path_buf(),
        });
    }
    if meta_files.is_empty() {
        return Err(Error::NoInputFiles {
            pattern: META_SUFFIX.to_string(),
            folder: folder.to_path_buf(),
        });
    }

    Ok(DiscoveredInputs {
        folder: folder.to_path_buf(),
        counts_files,
        meta_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_discover_sorted_pairs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lane2.olink_counts.csv");
        touch(dir.path(), "lane1.olink_counts.csv");
        touch(dir.path(), "lane1.olink_meta.json");
        touch(dir.path(), "lane2.olink_meta.json");
        touch(dir.path(), "notes.txt");

        let inputs = discover_inputs(dir.path()).unwrap();

        assert_eq!(
            inputs.counts_files,
            vec![
                dir.path().join("lane1.olink_counts.csv"),
                dir.path().join("lane2.olink_counts.csv"),
            ]
        );
        assert_eq!(inputs.meta_files.len(), 2);
    }

    #[test]
    fn test_discovery_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lane1.olink_counts.csv");
        touch(dir.path(), "lane1.olink_meta.json");

        let nested = dir.path().join("archive");
        fs::create_dir(&nested).unwrap();
        touch(&nested, "old.olink_counts.csv");
        touch(&nested, "old.olink_meta.json");

        let inputs = discover_inputs(dir.path()).unwrap();

        assert_eq!(inputs.counts_files.len(), 1);
        assert_eq!(inputs.meta_files.len(), 1);
    }

    #[test]
    fn test_missing_counts_files_rejected() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lane1.olink_meta.json");

        let err = discover_inputs(dir.path()).unwrap_err();

        match err {
            Error::NoInputFiles { pattern, .. } => assert_eq!(pattern, COUNTS_SUFFIX),
            other => panic!("expected NoInputFiles, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_meta_files_rejected() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lane1.olink_counts.csv");

        let err = discover_inputs(dir.path()).unwrap_err();

        match err {
            Error::NoInputFiles { pattern, .. } => assert_eq!(pattern, META_SUFFIX),
            other => panic!("expected NoInputFiles, got {other:?}"),
        }
    }
}
