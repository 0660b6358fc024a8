//! Flat list conversion.
//!
//! Line-oriented scanner that collects runs of consecutive same-kind list
//! lines into one list block. A blank line or a change of marker kind
//! terminates the run. Single level only: indentation never creates nested
//! structure.

/// List marker kind; a kind change mid-run splits the run into two lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    fn tags(self) -> (&'static str, &'static str) {
        match self {
            Self::Bullet => ("ul", "bullet-list"),
            Self::Numbered => ("ol", "numbered-list"),
        }
    }
}

/// Parse a list item line: marker, at least one whitespace, non-empty content.
fn parse_item(line: &str) -> Option<(ListKind, &str)> {
    let rest = line.trim_start();
    if let Some(after) = rest.strip_prefix(['-', '*']) {
        let content = after.trim_start();
        if content.len() < after.len() && !content.is_empty() {
            return Some((ListKind::Bullet, content));
        }
        return None;
    }
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(after) = rest[digits..].strip_prefix('.') {
            let content = after.trim_start();
            if content.len() < after.len() && !content.is_empty() {
                return Some((ListKind::Numbered, content));
            }
        }
    }
    None
}

/// Convert list runs to HTML list blocks; all other lines pass through.
#[must_use]
pub fn convert_lists(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let Some((kind, first)) = parse_item(lines[i]) else {
            out.push(lines[i].to_owned());
            i += 1;
            continue;
        };

        let mut items = vec![first];
        i += 1;
        while i < lines.len() {
            if lines[i].trim().is_empty() {
                break;
            }
            match parse_item(lines[i]) {
                Some((item_kind, content)) if item_kind == kind => {
                    items.push(content);
                    i += 1;
                }
                // Different kind or plain line: run ends, line is reprocessed.
                _ => break,
            }
        }

        let (tag, class) = kind.tags();
        out.push(format!(r#"<{tag} class="{class}">"#));
        for item in items {
            out.push(format!("  <li>{item}</li>"));
        }
        out.push(format!("</{tag}>"));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_bullet_list() {
        assert_eq!(
            convert_lists("- one\n- two"),
            "<ul class=\"bullet-list\">\n  <li>one</li>\n  <li>two</li>\n</ul>"
        );
    }

    #[test]
    fn test_star_bullets_share_kind_with_dash() {
        assert_eq!(
            convert_lists("- one\n* two"),
            "<ul class=\"bullet-list\">\n  <li>one</li>\n  <li>two</li>\n</ul>"
        );
    }

    #[test]
    fn test_numbered_list() {
        assert_eq!(
            convert_lists("1. one\n2. two"),
            "<ol class=\"numbered-list\">\n  <li>one</li>\n  <li>two</li>\n</ol>"
        );
    }

    #[test]
    fn test_kind_change_splits_into_two_lists() {
        let html = convert_lists("- one\n1. two");

        assert_eq!(
            html,
            "<ul class=\"bullet-list\">\n  <li>one</li>\n</ul>\n<ol class=\"numbered-list\">\n  <li>two</li>\n</ol>"
        );
    }

    #[test]
    fn test_blank_line_terminates_run() {
        let html = convert_lists("- one\n\n- two");

        assert_eq!(
            html,
            "<ul class=\"bullet-list\">\n  <li>one</li>\n</ul>\n\n<ul class=\"bullet-list\">\n  <li>two</li>\n</ul>"
        );
    }

    #[test]
    fn test_plain_line_terminates_run() {
        let html = convert_lists("- one\nplain text");

        assert_eq!(
            html,
            "<ul class=\"bullet-list\">\n  <li>one</li>\n</ul>\nplain text"
        );
    }

    #[test]
    fn test_mixed_indentation_stays_flat() {
        let html = convert_lists("- one\n    - deep\n- three");

        assert_eq!(
            html,
            "<ul class=\"bullet-list\">\n  <li>one</li>\n  <li>deep</li>\n  <li>three</li>\n</ul>"
        );
    }

    #[test]
    fn test_non_list_text_passes_through() {
        let text = "plain\nmore plain";
        assert_eq!(convert_lists(text), text);
    }

    #[test]
    fn test_marker_without_space_is_not_an_item() {
        assert_eq!(convert_lists("-nope\n1.nope"), "-nope\n1.nope");
    }
}
