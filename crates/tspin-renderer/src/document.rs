//! Document rendering pipeline.
//!
//! Single pass over the raw page text, no backtracking across lines:
//! separators and source citations are handled line by line, board
//! placeholders are swapped for numbered tokens before the inline passes
//! run, then each token is replaced by its rendered board row. The result
//! goes through the heading/breadcrumb post-processor.

use tspin_board::{BoardError, BoardStore, RenderMode};

use crate::headings::{self, Heading};
use crate::inline::convert_emphasis;
use crate::lists::convert_lists;

/// Marker emitted for a `---` separator line.
const SECTION_BREAK: &str = r#"<hr class="section-separator">"#;

/// A source citation extracted from the document body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Citation {
    /// Display label.
    pub label: String,
    /// Link target.
    pub url: String,
}

/// Result of rendering one document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedDocument {
    /// Rendered HTML fragment.
    pub html: String,
    /// Source citations, in declaration order.
    pub citations: Vec<Citation>,
    /// Headings, in document order.
    pub headings: Vec<Heading>,
}

/// Placeholder kind: `BOARD` renders only its first filename, `BOARDS`
/// renders up to three.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlaceholderKind {
    Single,
    Multi,
}

/// A board embed reference, recorded in declaration order.
#[derive(Debug, PartialEq, Eq)]
struct Placeholder {
    kind: PlaceholderKind,
    filenames: Vec<String>,
}

/// Render a document body.
///
/// `breadcrumb` is the trail of display labels injected into the title
/// block; pass an empty slice to skip injection (editor view).
///
/// # Errors
///
/// Returns [`BoardError::NotFound`] if a placeholder references a missing
/// board file.
pub fn render_document(
    raw: &str,
    document_path: &str,
    boards: &BoardStore,
    mode: RenderMode,
    breadcrumb: &[String],
) -> Result<RenderedDocument, BoardError> {
    let (body, citations) = split_citations(raw);
    let (body, placeholders) = extract_placeholders(&body);

    let body = convert_emphasis(&body);
    let mut body = convert_lists(&body);

    for (index, placeholder) in placeholders.iter().enumerate() {
        let fragment = match placeholder.kind {
            _ if placeholder.filenames.is_empty() => String::new(),
            PlaceholderKind::Single => {
                boards.render_row(document_path, &placeholder.filenames[..1], mode)?
            }
            PlaceholderKind::Multi => {
                boards.render_row(document_path, &placeholder.filenames, mode)?
            }
        };
        body = body.replace(&token(index), &fragment);
    }

    let headings = headings::extract_headings(&body);
    let mut html = headings::add_heading_ids(&body, &headings);
    html = headings::inject_breadcrumb(&html, breadcrumb);

    Ok(RenderedDocument {
        html,
        citations,
        headings,
    })
}

fn token(index: usize) -> String {
    format!("@@BOARDPLACEHOLDER{index}@@")
}

/// First line pass: section breaks and citation extraction.
///
/// Citation lines are removed from the body entirely. A citation line
/// missing the `" - "` separator is silently dropped and produces no
/// citation.
fn split_citations(raw: &str) -> (String, Vec<Citation>) {
    let mut body: Vec<&str> = Vec::new();
    let mut citations = Vec::new();

    for line in raw.lines() {
        let stripped = line.trim();
        if stripped == "---" {
            body.push(SECTION_BREAK);
        } else if let Some(payload) = strip_prefix_ignore_case(stripped, "SOURCE:") {
            if let Some((label, url)) = payload.trim().split_once(" - ") {
                citations.push(Citation {
                    label: label.trim().to_owned(),
                    url: url.trim().to_owned(),
                });
            }
        } else {
            body.push(line);
        }
    }

    (body.join("\n"), citations)
}

/// Replace board placeholders with numbered tokens, left to right,
/// non-overlapping, recording each in declaration order.
fn extract_placeholders(text: &str) -> (String, Vec<Placeholder>) {
    let mut out = String::with_capacity(text.len());
    let mut placeholders = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("[[") {
        match parse_placeholder(&rest[start..]) {
            Some((placeholder, consumed)) => {
                out.push_str(&rest[..start]);
                out.push_str(&token(placeholders.len()));
                placeholders.push(placeholder);
                rest = &rest[start + consumed..];
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = &rest[start + 2..];
            }
        }
    }
    out.push_str(rest);

    (out, placeholders)
}

/// Parse one placeholder at the start of `s` (which begins with `[[`).
///
/// Returns the placeholder and the number of bytes consumed, or `None` if
/// the text is not a board placeholder.
fn parse_placeholder(s: &str) -> Option<(Placeholder, usize)> {
    let end = s.find("]]")?;
    let inner = &s[2..end];
    if inner.contains(']') {
        return None;
    }

    let (keyword, payload) = inner.split_once(':')?;
    let kind = match keyword.trim().to_ascii_uppercase().as_str() {
        "BOARD" => PlaceholderKind::Single,
        "BOARDS" => PlaceholderKind::Multi,
        _ => return None,
    };

    let filenames: Vec<String> = payload
        .split(',')
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
        .collect();

    Some((Placeholder { kind, filenames }, end + 2))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
