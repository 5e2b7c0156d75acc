//! Filesystem file index.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::scanner::Scanner;
use crate::storage::{FileIndex, SourceFile, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File index backed by a docs directory on disk.
///
/// The directory is walked once at construction; reads go to disk each time.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use arrange_storage::{FileIndex, FsFiles};
///
/// let files = FsFiles::scan(Path::new("docs"), ".pages")?;
/// let content = files.read("guide/setup.md")?;
/// ```
#[derive(Debug)]
pub struct FsFiles {
    source_dir: PathBuf,
    files: Vec<SourceFile>,
    by_path: HashMap<String, usize>,
}

impl FsFiles {
    /// Walk `source_dir` and index its pages and metadata files.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory (or a subdirectory) can't be
    /// listed.
    pub fn scan(source_dir: &Path, meta_filename: &str) -> Result<Self, StorageError> {
        let mut files = Scanner::new(meta_filename)
            .scan(source_dir)
            .map_err(|e| e.with_backend(BACKEND))?;
        files.sort_by(SourceFile::site_order);

        let by_path = files
            .iter()
            .enumerate()
            .map(|(i, file)| (file.src_path.clone(), i))
            .collect();

        tracing::debug!(
            source_dir = %source_dir.display(),
            files = files.len(),
            "Scanned docs directory"
        );

        Ok(Self {
            source_dir: source_dir.to_path_buf(),
            files,
            by_path,
        })
    }

    /// Root directory this index was built from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}

impl FileIndex for FsFiles {
    fn files(&self) -> &[SourceFile] {
        &self.files
    }

    fn get(&self, src_path: &str) -> Option<&SourceFile> {
        self.by_path.get(src_path).map(|&i| &self.files[i])
    }

    fn read(&self, src_path: &str) -> Result<String, StorageError> {
        let path = self
            .get(src_path)
            .and_then(|file| file.abs_path.clone())
            .ok_or_else(|| StorageError::not_found(src_path).with_backend(BACKEND))?;
        fs::read_to_string(&path)
            .map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))
    }
}
