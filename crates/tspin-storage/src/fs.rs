//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading guide content from a local directory
//! tree. Documents are directories containing a `page.txt` marker; board
//! files live in a `boards/` subdirectory next to the marker.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{PAGE_FILE, RESERVED_DIRS, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Scans a content root recursively for `page.txt` markers and resolves
/// content paths relative to that root. No caching: every read hits the
/// filesystem so edits are picked up by the next render.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use tspin_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("content"));
/// let documents = storage.scan()?;
/// ```
pub struct FsStorage {
    /// Root directory for guide content.
    content_root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `content_root`.
    #[must_use]
    pub fn new(content_root: PathBuf) -> Self {
        Self { content_root }
    }

    /// Resolve a content path against the root, rejecting traversal.
    ///
    /// Content paths use `/` separators on every platform. Paths containing
    /// parent components (`..`), absolute segments, or empty segments are
    /// rejected so callers cannot escape the content root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let mut resolved = self.content_root.clone();
        for segment in path.split('/') {
            if segment.is_empty()
                || segment == "."
                || segment == ".."
                || segment.contains(['\\', ':'])
            {
                return Err(StorageError::new(StorageErrorKind::InvalidPath)
                    .with_path(path)
                    .with_backend(BACKEND));
            }
            resolved.push(segment);
        }
        Ok(resolved)
    }

    /// Scan a directory recursively and collect document paths.
    fn scan_directory(&self, dir_path: &Path, rel_path: &str, documents: &mut Vec<String>) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Skipping unreadable directory");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if !is_dir {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let child_rel = if rel_path.is_empty() {
                name.clone()
            } else {
                format!("{rel_path}/{name}")
            };
            let child_path = entry.path();

            // A directory with a page marker is a document, unless it carries
            // a reserved technical name.
            if !RESERVED_DIRS.contains(&name.as_str()) && child_path.join(PAGE_FILE).is_file() {
                documents.push(child_rel.clone());
            }

            self.scan_directory(&child_path, &child_rel, documents);
        }
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<String>, StorageError> {
        if !self.content_root.exists() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        self.scan_directory(&self.content_root, "", &mut documents);
        documents.sort();
        Ok(documents)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        let full_path = self.resolve(path)?;
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn write(&self, path: &str, content: &str) -> Result<(), StorageError> {
        let full_path = self.resolve(path)?;
        fs::write(&full_path, content)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND))
    }
}
