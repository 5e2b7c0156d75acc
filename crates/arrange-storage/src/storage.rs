//! File index trait and error types.
//!
//! # Path Convention
//!
//! All `src_path` values are forward-slash paths relative to the docs
//! directory, e.g. `"index.md"`, `"guide/setup.md"`, `"guide/.pages"`.

use std::cmp::Ordering;
use std::path::PathBuf;

/// What a source file is to the navigation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A markdown documentation page.
    Page,
    /// A per-directory metadata file.
    Metadata,
}

/// A file known to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the docs directory, forward slashes.
    pub src_path: String,
    pub kind: SourceKind,
    /// Absolute location on disk, if the file has one.
    pub abs_path: Option<PathBuf>,
}

impl SourceFile {
    /// Create a page entry.
    #[must_use]
    pub fn page(src_path: impl Into<String>) -> Self {
        Self {
            src_path: src_path.into(),
            kind: SourceKind::Page,
            abs_path: None,
        }
    }

    /// Create a metadata file entry.
    #[must_use]
    pub fn metadata(src_path: impl Into<String>) -> Self {
        Self {
            src_path: src_path.into(),
            kind: SourceKind::Metadata,
            abs_path: None,
        }
    }

    #[must_use]
    pub fn with_abs_path(mut self, abs_path: impl Into<PathBuf>) -> Self {
        self.abs_path = Some(abs_path.into());
        self
    }

    #[must_use]
    pub fn is_page(&self) -> bool {
        self.kind == SourceKind::Page
    }

    /// Last path component.
    #[must_use]
    pub fn name(&self) -> &str {
        self.src_path
            .rsplit_once('/')
            .map_or(self.src_path.as_str(), |(_, name)| name)
    }

    /// Whether this page is served at the site root.
    #[must_use]
    pub fn is_homepage(&self) -> bool {
        self.is_page() && is_index_name(&self.src_path)
    }

    /// Site order: within a directory, files come before subdirectories,
    /// `index.md`/`README.md` come first, and the rest sort by name.
    #[must_use]
    pub fn site_order(&self, other: &Self) -> Ordering {
        let mut a = self.src_path.split('/').peekable();
        let mut b = other.src_path.split('/').peekable();
        loop {
            match (a.next(), b.next()) {
                (Some(x), Some(y)) => {
                    let x_is_file = a.peek().is_none();
                    let y_is_file = b.peek().is_none();
                    let ord = y_is_file
                        .cmp(&x_is_file)
                        .then_with(|| {
                            if x_is_file && y_is_file {
                                is_index_name(y).cmp(&is_index_name(x))
                            } else {
                                Ordering::Equal
                            }
                        })
                        .then_with(|| x.cmp(y));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
            }
        }
    }
}

fn is_index_name(name: &str) -> bool {
    name == "index.md" || name == "README.md"
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// File does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Path is not valid UTF-8 or escapes the docs directory.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidPath,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };
        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// The set of source files a build works from.
///
/// Implementations list files in site order (see [`SourceFile::site_order`])
/// and serve their contents by `src_path`.
pub trait FileIndex {
    /// All known files, pages and metadata files alike, in site order.
    fn files(&self) -> &[SourceFile];

    /// Look up a file by its `src_path`.
    fn get(&self, src_path: &str) -> Option<&SourceFile>;

    /// Read a file's contents.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] when the
    /// file is unknown or has disappeared, or another kind when it can't be
    /// read.
    fn read(&self, src_path: &str) -> Result<String, StorageError>;
}
