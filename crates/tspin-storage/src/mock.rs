//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::{PAGE_FILE, RESERVED_DIRS, Storage, StorageError};

/// Mock storage for testing.
///
/// Stores files in memory keyed by content path. Use the builder methods to
/// configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use tspin_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_page("basics/overview", "Some **bold** text")
///     .with_board("basics/overview", "main.txt", "..tt......\n");
///
/// let documents = storage.scan().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<HashMap<String, String>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw file at an arbitrary content path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Add a document: a `page.txt` under the given document path.
    #[must_use]
    pub fn with_page(self, document_path: &str, content: impl Into<String>) -> Self {
        self.with_file(format!("{document_path}/{PAGE_FILE}"), content)
    }

    /// Add a board file under the given document path.
    #[must_use]
    pub fn with_board(
        self,
        document_path: &str,
        filename: &str,
        content: impl Into<String>,
    ) -> Self {
        self.with_file(format!("{document_path}/boards/{filename}"), content)
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<String>, StorageError> {
        let files = self.files.read().unwrap();
        let mut documents: Vec<String> = files
            .keys()
            .filter_map(|path| path.strip_suffix(PAGE_FILE)?.strip_suffix('/'))
            .filter(|document| {
                let name = document.rsplit('/').next().unwrap_or(document);
                !RESERVED_DIRS.contains(&name)
            })
            .map(str::to_owned)
            .collect();
        documents.sort();
        Ok(documents)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn write(&self, path: &str, content: &str) -> Result<(), StorageError> {
        self.files
            .write()
            .unwrap()
            .insert(path.to_owned(), content.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scan_derives_document_paths() {
        let storage = MockStorage::new()
            .with_page("basics/overview", "text")
            .with_page("misc", "text")
            .with_board("basics/overview", "main.txt", "grid");

        let documents = storage.scan().unwrap();

        assert_eq!(
            documents,
            vec!["basics/overview".to_owned(), "misc".to_owned()]
        );
    }

    #[test]
    fn test_scan_excludes_reserved_names() {
        let storage = MockStorage::new()
            .with_page("basics/overview", "text")
            .with_page("basics/boards", "text");

        assert_eq!(storage.scan().unwrap(), vec!["basics/overview".to_owned()]);
    }

    #[test]
    fn test_read_and_exists() {
        let storage = MockStorage::new().with_board("a", "b.txt", "grid");

        assert_eq!(storage.read("a/boards/b.txt").unwrap(), "grid");
        assert!(storage.exists("a/boards/b.txt"));
        assert!(!storage.exists("a/boards/c.txt"));
        assert!(storage.read("a/boards/c.txt").unwrap_err().is_not_found());
    }

    #[test]
    fn test_write_is_visible_to_read() {
        let storage = MockStorage::new().with_page("a", "old");

        storage.write("a/page.txt", "new").unwrap();

        assert_eq!(storage.read("a/page.txt").unwrap(), "new");
    }
}
