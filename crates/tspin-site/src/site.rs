//! Unified site façade.
//!
//! [`Site`] ties storage, board loading, document rendering and navigation
//! together. Every operation reads fresh content from storage: there is no
//! cache and no shared mutable render state, so concurrent calls never
//! observe each other. Writes through the save operations are not isolated
//! from concurrent reads; a render racing a save may observe a torn file.

use std::sync::Arc;

use serde::Serialize;
use tspin_board::{BoardError, BoardStore, RenderMode};
use tspin_renderer::{Citation, Heading, render_document};
use tspin_storage::{PAGE_FILE, Storage, StorageError};

use crate::nav::{self, NavNode, NavOrdering, display_name};

/// Rendering and save errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Requested document has no backing source.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
    /// A referenced board file is missing or unreadable.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// Storage failed.
    #[error("Storage error: {0}")]
    Storage(StorageError),
}

/// Breadcrumb trail item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display name of the path segment.
    pub name: String,
    /// Cumulative document path up to this segment.
    pub path: String,
}

/// Result of rendering a document for the reading view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageRenderResult {
    /// Rendered HTML fragment with anchors and breadcrumb injected.
    pub html: String,
    /// Source citations, in declaration order.
    pub citations: Vec<Citation>,
    /// Headings, in document order.
    pub headings: Vec<Heading>,
    /// Breadcrumb trail for the document path.
    pub breadcrumbs: Vec<BreadcrumbItem>,
}

/// Result of rendering a document for the editor view.
///
/// Carries the raw source alongside the rendered fragment; boards render
/// with their edit controls and no breadcrumb is injected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EditorRenderResult {
    /// Raw page source text.
    pub raw: String,
    /// Rendered HTML fragment.
    pub html: String,
    /// Source citations, in declaration order.
    pub citations: Vec<Citation>,
    /// Headings, in document order.
    pub headings: Vec<Heading>,
}

/// Unified site structure and page rendering.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::path::PathBuf;
/// use std::sync::Arc;
/// use tspin_site::Site;
/// use tspin_storage::FsStorage;
///
/// let storage = Arc::new(FsStorage::new(PathBuf::from("content")));
/// let site = Site::new(storage);
///
/// let tree = site.navigation()?;
/// let page = site.render("basics/overview")?;
/// # Ok(())
/// # }
/// ```
pub struct Site {
    storage: Arc<dyn Storage>,
    boards: BoardStore,
    ordering: NavOrdering,
}

impl Site {
    /// Create a site with the production navigation ordering.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_ordering(storage, NavOrdering::default())
    }

    /// Create a site with custom navigation ordering.
    #[must_use]
    pub fn with_ordering(storage: Arc<dyn Storage>, ordering: NavOrdering) -> Self {
        Self {
            boards: BoardStore::new(Arc::clone(&storage)),
            storage,
            ordering,
        }
    }

    /// All discovered document paths, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Storage`] if the content root cannot be
    /// scanned.
    pub fn pages(&self) -> Result<Vec<String>, RenderError> {
        self.storage.scan().map_err(RenderError::Storage)
    }

    /// Document paths whose board references all resolve.
    ///
    /// A document excluded here is still renderable directly by path;
    /// discoverability and direct access are independent.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Storage`] if the content root cannot be
    /// scanned.
    pub fn valid_pages(&self) -> Result<Vec<String>, RenderError> {
        Ok(self
            .pages()?
            .into_iter()
            .filter(|path| nav::has_valid_boards(self.storage.as_ref(), path))
            .collect())
    }

    /// Build the ordered navigation forest.
    ///
    /// Documents with broken board references are hidden; a broken document
    /// never aborts tree construction.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Storage`] if the content root cannot be
    /// scanned.
    pub fn navigation(&self) -> Result<Vec<NavNode>, RenderError> {
        let valid = self.valid_pages()?;
        Ok(nav::build_tree(&valid, &self.ordering))
    }

    /// Breadcrumb trail for a document path: one item per segment with
    /// cumulative paths and display names.
    #[must_use]
    pub fn breadcrumbs(&self, document_path: &str) -> Vec<BreadcrumbItem> {
        let mut items = Vec::new();
        let mut cumulative = String::new();
        for segment in document_path.split('/').filter(|s| !s.is_empty()) {
            if !cumulative.is_empty() {
                cumulative.push('/');
            }
            cumulative.push_str(segment);
            items.push(BreadcrumbItem {
                name: display_name(segment),
                path: cumulative.clone(),
            });
        }
        items
    }

    /// Render a document for the reading view.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DocumentNotFound`] if the page source is
    /// absent and [`RenderError::Board`] if a referenced board is missing.
    pub fn render(&self, document_path: &str) -> Result<PageRenderResult, RenderError> {
        let raw = self.read_source(document_path)?;
        let breadcrumbs = self.breadcrumbs(document_path);
        let trail: Vec<String> = breadcrumbs.iter().map(|b| b.name.clone()).collect();

        let doc = render_document(
            &raw,
            document_path,
            &self.boards,
            RenderMode::View,
            &trail,
        )?;

        Ok(PageRenderResult {
            html: doc.html,
            citations: doc.citations,
            headings: doc.headings,
            breadcrumbs,
        })
    }

    /// Render a document for the editor view: edit controls on boards, raw
    /// source included, no breadcrumb.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DocumentNotFound`] if the page source is
    /// absent and [`RenderError::Board`] if a referenced board is missing.
    pub fn render_editor(&self, document_path: &str) -> Result<EditorRenderResult, RenderError> {
        let raw = self.read_source(document_path)?;
        let doc = render_document(&raw, document_path, &self.boards, RenderMode::Editor, &[])?;

        Ok(EditorRenderResult {
            raw,
            html: doc.html,
            citations: doc.citations,
            headings: doc.headings,
        })
    }

    /// Overwrite an existing document's page source.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DocumentNotFound`] if the document does not
    /// already exist; saving never creates documents.
    pub fn save_document(&self, document_path: &str, content: &str) -> Result<(), RenderError> {
        let path = format!("{document_path}/{PAGE_FILE}");
        if !self.storage.exists(&path) {
            tracing::warn!(document = %document_path, "Refusing to save unknown document");
            return Err(RenderError::DocumentNotFound(document_path.to_owned()));
        }
        self.storage
            .write(&path, content)
            .map_err(RenderError::Storage)
    }

    /// Rewrite an existing board's grid, preserving its metadata header.
    ///
    /// `board_id` is the opaque id carried by rendered boards
    /// (`<document path>/boards/<filename>`). Leading blank and `#` lines of
    /// the current file are kept in place; everything after them is replaced
    /// by `rows`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Board`] with a not-found error if the board
    /// file does not already exist.
    pub fn save_board(&self, board_id: &str, rows: &[String]) -> Result<(), RenderError> {
        if !self.storage.exists(board_id) {
            tracing::warn!(board = %board_id, "Refusing to save unknown board");
            return Err(RenderError::Board(BoardError::NotFound(board_id.to_owned())));
        }
        let existing = self.storage.read(board_id).map_err(RenderError::Storage)?;

        let mut lines: Vec<&str> = Vec::new();
        for line in existing.lines() {
            let stripped = line.trim();
            if !stripped.is_empty() && !stripped.starts_with('#') {
                break;
            }
            lines.push(line);
        }
        lines.extend(rows.iter().map(String::as_str));

        let content = format!("{}\n", lines.join("\n"));
        self.storage
            .write(board_id, &content)
            .map_err(RenderError::Storage)
    }

    fn read_source(&self, document_path: &str) -> Result<String, RenderError> {
        let path = format!("{document_path}/{PAGE_FILE}");
        self.storage.read(&path).map_err(|e| {
            if e.is_not_found() {
                RenderError::DocumentNotFound(document_path.to_owned())
            } else {
                RenderError::Storage(e)
            }
        })
    }
}
