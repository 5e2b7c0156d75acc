//! Mock file index for testing.
//!
//! Provides [`MockFiles`] for unit testing without filesystem access.

use std::collections::HashMap;

use crate::storage::{FileIndex, SourceFile, StorageError};

/// In-memory file index.
///
/// Files are kept in site order regardless of insertion order, matching
/// [`FsFiles`](crate::FsFiles).
///
/// # Example
///
/// ```ignore
/// use arrange_storage::{FileIndex, MockFiles};
///
/// let files = MockFiles::new()
///     .with_page("index.md", "# Home")
///     .with_meta("guide/.pages", "title: Guide");
///
/// assert_eq!(files.read("guide/.pages").unwrap(), "title: Guide");
/// ```
#[derive(Debug, Default)]
pub struct MockFiles {
    files: Vec<SourceFile>,
    contents: HashMap<String, String>,
}

impl MockFiles {
    /// Create a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with content.
    #[must_use]
    pub fn with_page(self, src_path: impl Into<String>, content: impl Into<String>) -> Self {
        let src_path = src_path.into();
        self.with_file(SourceFile::page(src_path.clone()), Some(content.into()))
    }

    /// Add several empty pages.
    #[must_use]
    pub fn with_pages<'a>(self, src_paths: impl IntoIterator<Item = &'a str>) -> Self {
        src_paths
            .into_iter()
            .fold(self, |files, path| files.with_page(path, ""))
    }

    /// Add a metadata file with content.
    #[must_use]
    pub fn with_meta(self, src_path: impl Into<String>, content: impl Into<String>) -> Self {
        let src_path = src_path.into();
        self.with_file(SourceFile::metadata(src_path.clone()), Some(content.into()))
    }

    /// Add a file that is listed but fails to read with "not found", like a
    /// file deleted between scan and read.
    #[must_use]
    pub fn with_vanished(self, file: SourceFile) -> Self {
        self.with_file(file, None)
    }

    fn with_file(mut self, file: SourceFile, content: Option<String>) -> Self {
        match content {
            Some(content) => self.contents.insert(file.src_path.clone(), content),
            None => self.contents.remove(&file.src_path),
        };
        self.files.retain(|f| f.src_path != file.src_path);
        self.files.push(file);
        self.files.sort_by(SourceFile::site_order);
        self
    }
}

impl FileIndex for MockFiles {
    fn files(&self) -> &[SourceFile] {
        &self.files
    }

    fn get(&self, src_path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.src_path == src_path)
    }

    fn read(&self, src_path: &str) -> Result<String, StorageError> {
        self.contents
            .get(src_path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(src_path).with_backend("Mock"))
    }
}
