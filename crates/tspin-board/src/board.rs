//! Board model and store.

use std::sync::Arc;

use tspin_storage::{BOARDS_DIR, Storage, StorageError};

use crate::render::{self, RenderMode};

/// Board height in rows.
pub const BOARD_HEIGHT: usize = 20;

/// Board width in cells.
pub const BOARD_WIDTH: usize = 10;

/// Row of all-empty cells used when padding short grids.
const EMPTY_ROW: &str = "__________";

/// Map a grid character to its piece key, if it is a recognized piece letter.
///
/// Recognition is case-insensitive; the returned key is lowercase. Any other
/// character (including the `_` padding cell) maps to `None`.
#[must_use]
pub fn piece_key(ch: char) -> Option<char> {
    let lower = ch.to_ascii_lowercase();
    matches!(lower, 'i' | 'o' | 't' | 's' | 'z' | 'j' | 'l').then_some(lower)
}

/// Case-insensitive ASCII prefix strip.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// A parsed board: a 20-row grid plus optional active-piece metadata.
///
/// Rows are stored as read from the file (plus grid-level padding); cell
/// normalization to lowercase happens at render time. Row width is enforced
/// by the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    rows: Vec<String>,
    pieces: Option<Vec<String>>,
}

impl Board {
    /// Parse board text.
    ///
    /// Lines before the first non-empty, non-metadata line are scanned for
    /// metadata: a line whose stripped form starts with `#` is metadata, and
    /// a `PIECES:` payload (case-insensitive) is split on commas, trimmed and
    /// lowercased. Other `#` lines are ignored. From the first grid line on,
    /// every line belongs to the grid verbatim — blank lines and lines
    /// starting with `#` included.
    ///
    /// Never fails: the grid is clamped to exactly [`BOARD_HEIGHT`] rows.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut pieces: Option<Vec<String>> = None;
        let mut rows: Vec<String> = Vec::new();
        let mut in_grid = false;

        for line in text.lines() {
            if in_grid {
                rows.push(line.to_owned());
                continue;
            }
            let stripped = line.trim();
            if stripped.is_empty() {
                continue;
            }
            if stripped.starts_with('#') {
                let meta = stripped.trim_start_matches('#').trim();
                if let Some(payload) = strip_prefix_ignore_case(meta, "PIECES:") {
                    let list: Vec<String> = payload
                        .split(',')
                        .map(|p| p.trim().to_lowercase())
                        .filter(|p| !p.is_empty())
                        .collect();
                    if !list.is_empty() {
                        pieces = Some(list);
                    }
                }
                continue;
            }
            in_grid = true;
            rows.push(line.to_owned());
        }

        // Grid-level clamp: exactly BOARD_HEIGHT rows, empty-padded.
        rows.truncate(BOARD_HEIGHT);
        while rows.len() < BOARD_HEIGHT {
            rows.push(EMPTY_ROW.to_owned());
        }

        Self { rows, pieces }
    }

    /// Grid rows, top row first. Always exactly [`BOARD_HEIGHT`] entries.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Active-piece keys from the metadata header, lowercased.
    #[must_use]
    pub fn pieces(&self) -> Option<&[String]> {
        self.pieces.as_deref()
    }
}

/// Board loading errors.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Referenced board file is missing.
    #[error("Board file not found: {0}")]
    NotFound(String),
    /// Storage failed while reading the board file.
    #[error("Board storage error: {0}")]
    Storage(StorageError),
}

/// Loads and renders boards through a storage backend.
///
/// Boards are identified by `(document path, filename)` and live at
/// `<document path>/boards/<filename>` in storage. Every load reads fresh
/// content; nothing is cached.
pub struct BoardStore {
    storage: Arc<dyn Storage>,
}

impl BoardStore {
    /// Create a new board store.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Content path of a board file, also used as its opaque board id.
    #[must_use]
    pub fn board_path(document_path: &str, filename: &str) -> String {
        format!("{document_path}/{BOARDS_DIR}/{filename}")
    }

    /// Load and parse a single board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] if the backing file is absent.
    pub fn load(&self, document_path: &str, filename: &str) -> Result<Board, BoardError> {
        let path = Self::board_path(document_path, filename);
        let text = self.storage.read(&path).map_err(|e| {
            if e.is_not_found() {
                BoardError::NotFound(path.clone())
            } else {
                BoardError::Storage(e)
            }
        })?;
        Ok(Board::parse(&text))
    }

    /// Load up to [`MAX_BOARDS_PER_ROW`](crate::MAX_BOARDS_PER_ROW) boards
    /// and render them as one horizontal row.
    ///
    /// Filenames beyond the limit are silently discarded. Rendering order is
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] if any rendered board is absent.
    pub fn render_row(
        &self,
        document_path: &str,
        filenames: &[String],
        mode: RenderMode,
    ) -> Result<String, BoardError> {
        let mut boards = Vec::new();
        for filename in filenames.iter().take(crate::MAX_BOARDS_PER_ROW) {
            boards.push((filename.clone(), self.load(document_path, filename)?));
        }
        Ok(render::boards_row_html(document_path, &boards, mode))
    }
}
