//! Pure HTML rendering for parsed boards.
//!
//! No I/O happens here: rendering is a pure transform from a [`Board`] to a
//! markup fragment. The caller (the document pipeline) supplies loaded
//! boards and the opaque board id carried on interactive controls.

use std::fmt::Write;

use crate::board::{BOARD_WIDTH, Board, BoardStore, piece_key};

/// Maximum number of boards rendered in one horizontal row; extras are
/// silently discarded.
pub const MAX_BOARDS_PER_ROW: usize = 3;

/// Rendering variant for boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Plain reading view.
    View,
    /// Reading view plus a per-board options menu for the edit flow.
    /// Same parse, extra markup only.
    Editor,
}

/// Render a single board as a fixed 20×10 cell grid.
///
/// Each row is independently left-justified, space-padded and truncated to
/// [`BOARD_WIDTH`] characters, on top of the grid-level row clamp performed
/// at parse time. Recognized piece letters get a `cell-<letter>` class; any
/// other character renders as `cell-empty`.
#[must_use]
pub fn board_html(board: &Board, board_id: &str, mode: RenderMode) -> String {
    let mut out = String::with_capacity(4096);

    if mode == RenderMode::Editor {
        push_editor_header(&mut out, board_id);
    }

    write!(out, r#"<div class="tetris-board" data-board-id="{board_id}""#).unwrap();
    if let Some(pieces) = board.pieces().filter(|p| !p.is_empty()) {
        write!(out, r#" data-pieces="{}""#, pieces.join(",")).unwrap();
    }
    let grid: Vec<String> = board
        .rows()
        .iter()
        .map(|r| r.replace('"', "&quot;"))
        .collect();
    write!(out, r#" data-grid="{}">"#, grid.join("|")).unwrap();

    for row in board.rows() {
        out.push_str(r#"<div class="tetris-row">"#);
        for ch in padded_cells(row) {
            match piece_key(ch) {
                Some(piece) => write!(
                    out,
                    r#"<div class="tetris-cell cell-{piece}" data-piece="{piece}"></div>"#
                )
                .unwrap(),
                None => out
                    .push_str(r#"<div class="tetris-cell cell-empty" data-piece=""></div>"#),
            }
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
    out
}

/// Render up to three boards as one horizontal row with captions.
///
/// Captions derive from the filename stem: underscores become spaces, words
/// are title-cased. Rendering order is the order of `boards`.
#[must_use]
pub fn boards_row_html(
    document_path: &str,
    boards: &[(String, Board)],
    mode: RenderMode,
) -> String {
    let mut out = String::from(r#"<div class="tetris-board-row">"#);
    for (filename, board) in boards.iter().take(MAX_BOARDS_PER_ROW) {
        let board_id = BoardStore::board_path(document_path, filename);
        out.push_str(r#"<figure class="tetris-board-wrapper">"#);
        out.push_str(&board_html(board, &board_id, mode));
        write!(
            out,
            r#"<div class="tetris-board-caption">{}</div>"#,
            caption_for(filename)
        )
        .unwrap();
        out.push_str("</figure>");
    }
    out.push_str("</div>");
    out
}

/// Derive a display caption from a board filename.
#[must_use]
pub fn caption_for(filename: &str) -> String {
    let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
    title_case(&stem.replace('_', " "))
}

/// Title-case space-separated words.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Exactly [`BOARD_WIDTH`] cell characters for a row: left-justified,
/// space-padded, truncated.
fn padded_cells(row: &str) -> impl Iterator<Item = char> + '_ {
    row.chars()
        .chain(std::iter::repeat(' '))
        .take(BOARD_WIDTH)
}

fn push_editor_header(out: &mut String, board_id: &str) {
    out.push_str(r#"<div class="tetris-board-header"><div class="board-dropdown">"#);
    out.push_str(
        r#"<button class="board-dropdown-toggle" type="button" aria-label="Board options"><span class="board-dropdown-icon">⋯</span></button>"#,
    );
    write!(
        out,
        r#"<div class="board-dropdown-menu" style="display: none;"><button class="board-dropdown-item" data-action="edit" data-board-id="{board_id}">Edit Board</button></div>"#
    )
    .unwrap();
    out.push_str("</div></div>");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::board::BOARD_HEIGHT;

    #[test]
    fn test_board_html_has_full_grid() {
        let board = Board::parse("iiii______\n");
        let html = board_html(&board, "doc/boards/a.txt", RenderMode::View);

        assert_eq!(html.matches(r#"<div class="tetris-row">"#).count(), BOARD_HEIGHT);
        assert_eq!(
            html.matches(r#"<div class="tetris-cell"#).count(),
            BOARD_HEIGHT * BOARD_WIDTH
        );
    }

    #[test]
    fn test_board_html_cell_classes() {
        let board = Board::parse("Tx________\n");
        let html = board_html(&board, "doc/boards/a.txt", RenderMode::View);

        // Uppercase piece letters normalize to lowercase classes; anything
        // unrecognized is an empty cell.
        assert!(html.contains(r#"cell-t" data-piece="t""#));
        assert!(!html.contains("cell-x"));
    }

    #[test]
    fn test_board_html_short_row_padded() {
        let board = Board::parse("ii\n");
        let html = board_html(&board, "doc/boards/a.txt", RenderMode::View);

        // Two piece cells, the rest of the row padded to empty.
        assert_eq!(html.matches("cell-i").count(), 2);
    }

    #[test]
    fn test_board_html_wide_row_truncated() {
        let board = Board::parse(&"i".repeat(15));
        let html = board_html(&board, "doc/boards/a.txt", RenderMode::View);

        assert_eq!(html.matches("cell-i").count(), BOARD_WIDTH);
    }

    #[test]
    fn test_board_html_pieces_attribute() {
        let board = Board::parse("# PIECES: i, o\n__________\n");
        let html = board_html(&board, "doc/boards/a.txt", RenderMode::View);

        assert!(html.contains(r#" data-pieces="i,o""#));
    }

    #[test]
    fn test_board_html_grid_attribute_escapes_quotes() {
        let board = Board::parse("ab\"cd_____\n");
        let html = board_html(&board, "doc/boards/a.txt", RenderMode::View);

        assert!(html.contains("ab&quot;cd_____"));
    }

    #[test]
    fn test_view_mode_has_no_editor_controls() {
        let board = Board::parse("__________\n");
        let html = board_html(&board, "doc/boards/a.txt", RenderMode::View);

        assert!(!html.contains("board-dropdown"));
    }

    #[test]
    fn test_editor_mode_carries_board_id() {
        let board = Board::parse("__________\n");
        let html = board_html(&board, "basics/overview/boards/main.txt", RenderMode::Editor);

        assert!(html.contains(r#"data-action="edit" data-board-id="basics/overview/boards/main.txt""#));
        assert!(html.contains("board-dropdown-menu"));
    }

    #[test]
    fn test_boards_row_caps_at_three() {
        let boards: Vec<(String, Board)> = ["a.txt", "b.txt", "c.txt", "d.txt"]
            .iter()
            .map(|name| ((*name).to_owned(), Board::parse("__________\n")))
            .collect();
        let html = boards_row_html("doc", &boards, RenderMode::View);

        assert_eq!(html.matches("tetris-board-wrapper").count(), MAX_BOARDS_PER_ROW);
        assert!(html.contains("doc/boards/a.txt"));
        assert!(!html.contains("d.txt"));
    }

    #[test]
    fn test_boards_row_order_is_declaration_order() {
        let boards: Vec<(String, Board)> = ["b.txt", "a.txt"]
            .iter()
            .map(|name| ((*name).to_owned(), Board::parse("__________\n")))
            .collect();
        let html = boards_row_html("doc", &boards, RenderMode::View);

        let b_pos = html.find("doc/boards/b.txt").unwrap();
        let a_pos = html.find("doc/boards/a.txt").unwrap();
        assert!(b_pos < a_pos);
    }

    #[test]
    fn test_caption_from_filename_stem() {
        assert_eq!(caption_for("main_setup.txt"), "Main Setup");
        assert_eq!(caption_for("fractal.txt"), "Fractal");
        assert_eq!(caption_for("no_extension"), "No Extension");
    }
}
