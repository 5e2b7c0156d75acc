//! Source file index for the arrange navigation engine.
//!
//! The navigation engine never touches the filesystem directly. It asks a
//! [`FileIndex`] which documentation pages and metadata files exist and reads
//! their contents through it. This enables:
//!
//! - **Unit testing** with an in-memory index
//! - **Generated sites** whose files do not live on disk
//!
//! # Architecture
//!
//! The crate provides:
//! - [`FileIndex`] trait with `files()`, `get()`, and `read()` methods
//! - [`FsFiles`] implementation that walks a docs directory
//! - [`MockFiles`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use arrange_storage::{FileIndex, FsFiles};
//!
//! let files = FsFiles::scan(Path::new("docs"), ".pages")?;
//! for file in files.files() {
//!     println!("{}", file.src_path);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod scanner;
mod storage;

pub use fs::FsFiles;
#[cfg(feature = "mock")]
pub use mock::MockFiles;
pub use storage::{FileIndex, SourceFile, SourceKind, StorageError, StorageErrorKind};
