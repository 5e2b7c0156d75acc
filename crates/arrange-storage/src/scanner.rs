//! Source file discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{SourceFile, StorageError};

/// Walks a docs directory collecting pages and metadata files.
///
/// Hidden files and directories are skipped, except for files named like the
/// metadata file (which is usually hidden itself, e.g. `.pages`).
pub(crate) struct Scanner<'a> {
    meta_filename: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(meta_filename: &'a str) -> Self {
        Self { meta_filename }
    }

    /// Scan `source_dir` recursively. Order of the result is unspecified.
    pub fn scan(&self, source_dir: &Path) -> Result<Vec<SourceFile>, StorageError> {
        let mut files = Vec::new();
        self.scan_directory(source_dir, "", &mut files)?;
        Ok(files)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        prefix: &str,
        files: &mut Vec<SourceFile>,
    ) -> Result<(), StorageError> {
        let entries = fs::read_dir(dir_path)
            .map_err(|e| StorageError::io(e, Some(dir_path.to_path_buf())))?;

        let mut has_index = false;
        let mut readme: Option<SourceFile> = None;

        for entry in entries.filter_map(Result::ok) {
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') && (is_dir || name != self.meta_filename) {
                continue;
            }

            let src_path = join(prefix, &name);
            let abs_path: PathBuf = entry.path();

            if is_dir {
                self.scan_directory(&abs_path, &src_path, files)?;
            } else if name == self.meta_filename {
                files.push(SourceFile::metadata(src_path).with_abs_path(abs_path));
            } else if abs_path.extension().is_some_and(|e| e == "md") {
                let file = SourceFile::page(src_path).with_abs_path(abs_path);
                match name.as_str() {
                    "README.md" => readme = Some(file),
                    "index.md" => {
                        has_index = true;
                        files.push(file);
                    }
                    _ => files.push(file),
                }
            }
        }

        // index.md and README.md would both map to the directory URL
        if let Some(readme) = readme {
            if has_index {
                tracing::warn!(
                    path = %readme.src_path,
                    "Both index.md and README.md found; skipping README.md"
                );
            } else {
                files.push(readme);
            }
        }

        Ok(())
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn scan_paths(dir: &Path) -> Vec<String> {
        let mut paths: Vec<_> = Scanner::new(".pages")
            .scan(dir)
            .unwrap()
            .into_iter()
            .map(|f| f.src_path)
            .collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_scan_finds_md_and_meta_files() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("guide")).unwrap();
        fs::write(temp_dir.path().join("index.md"), "# Home").unwrap();
        fs::write(temp_dir.path().join("guide/setup.md"), "# Setup").unwrap();
        fs::write(temp_dir.path().join("guide/.pages"), "title: Guide").unwrap();
        fs::write(temp_dir.path().join("logo.png"), "").unwrap();

        assert_eq!(
            scan_paths(temp_dir.path()),
            vec!["guide/.pages", "guide/setup.md", "index.md"]
        );
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        fs::write(temp_dir.path().join(".git/notes.md"), "").unwrap();
        fs::write(temp_dir.path().join(".draft.md"), "").unwrap();
        fs::write(temp_dir.path().join("page.md"), "").unwrap();

        assert_eq!(scan_paths(temp_dir.path()), vec!["page.md"]);
    }

    #[test]
    fn test_scan_hidden_dir_named_like_meta_is_skipped() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join(".pages")).unwrap();
        fs::write(temp_dir.path().join(".pages/a.md"), "").unwrap();

        assert!(scan_paths(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_scan_readme_shadowed_by_index() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("index.md"), "").unwrap();
        fs::write(temp_dir.path().join("README.md"), "").unwrap();
        fs::create_dir(temp_dir.path().join("a")).unwrap();
        fs::write(temp_dir.path().join("a/README.md"), "").unwrap();

        assert_eq!(scan_paths(temp_dir.path()), vec!["a/README.md", "index.md"]);
    }

    #[test]
    fn test_scan_custom_meta_filename() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("_nav.yml"), "").unwrap();
        fs::write(temp_dir.path().join(".pages"), "").unwrap();

        let files = Scanner::new("_nav.yml").scan(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].src_path, "_nav.yml");
        assert!(!files[0].is_page());
    }

    #[test]
    fn test_scan_missing_dir() {
        let temp_dir = create_test_dir();
        let err = Scanner::new(".pages")
            .scan(&temp_dir.path().join("missing"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
