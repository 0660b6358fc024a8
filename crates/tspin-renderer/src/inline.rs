//! Inline emphasis conversion.
//!
//! Three passes in strict order, each written so it cannot re-trigger the
//! previous one:
//! 1. `**text**` → `<strong>`
//! 2. `*text*` → `<strong>`, line by line, skipping list-item lines so
//!    bullet markers are never read as emphasis delimiters
//! 3. `_text_` → `<em>`, content free of underscores and newlines
//!
//! Text without emphasis syntax passes through unchanged; no escaping is
//! performed (documents are trusted content).

use std::sync::LazyLock;

use regex::Regex;

static DOUBLE_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_\n]+?)_").unwrap());

/// Apply all emphasis passes.
#[must_use]
pub fn convert_emphasis(content: &str) -> String {
    let content = DOUBLE_STAR.replace_all(content, "<strong>$1</strong>");

    let content = content
        .split('\n')
        .map(|line| {
            if is_list_line(line) {
                line.to_owned()
            } else {
                convert_single_star(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    UNDERSCORE.replace_all(&content, "<em>$1</em>").into_owned()
}

/// True if the line opens with a list marker (`-`, `*`, or `N.` followed by
/// whitespace), in which case single-asterisk emphasis is skipped.
pub(crate) fn is_list_line(line: &str) -> bool {
    let rest = line.trim_start();
    if let Some(after) = rest.strip_prefix(['-', '*']) {
        return after.chars().next().is_some_and(char::is_whitespace);
    }
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(after) = rest[digits..].strip_prefix('.') {
            return after.chars().next().is_some_and(char::is_whitespace);
        }
    }
    false
}

/// Convert `*text*` on a single line.
///
/// A `*` adjacent to another `*` is not a delimiter, so leftovers of the
/// double-asterisk pass are never re-matched. Content runs to the next `*`
/// and must be non-empty.
fn convert_single_star(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' {
            i += 1;
            continue;
        }
        let prev_is_star = i > 0 && bytes[i - 1] == b'*';
        let next_is_star = bytes.get(i + 1) == Some(&b'*');
        if prev_is_star || next_is_star {
            i += 1;
            continue;
        }
        // Closing delimiter is the next '*'; it must exist, leave non-empty
        // content, and not butt up against another '*'.
        let Some(rel) = line[i + 1..].find('*') else {
            i += 1;
            continue;
        };
        let close = i + 1 + rel;
        if close == i + 1 || bytes.get(close + 1) == Some(&b'*') {
            i += 1;
            continue;
        }
        out.push_str(&line[copied..i]);
        out.push_str("<strong>");
        out.push_str(&line[i + 1..close]);
        out.push_str("</strong>");
        copied = close + 1;
        i = close + 1;
    }

    out.push_str(&line[copied..]);
    out
}
