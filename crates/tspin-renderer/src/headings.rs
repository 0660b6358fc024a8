//! Heading extraction, anchor ids, and breadcrumb injection.
//!
//! Documents carry their headings as raw `<div class="h1">…</div>` blocks
//! (levels 1–3). After the body is rendered, headings are extracted for the
//! in-page nav and each block is rewritten in place with an anchor id.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<div class="(h[1-3])">(.*?)</div>"#).unwrap());

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(<div class="article-title">)(.*?)(</div>)"#).unwrap());

/// A heading extracted from a rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    /// Heading level, 1–3.
    pub level: u8,
    /// Heading text, trimmed.
    pub text: String,
    /// Anchor id derived from the text.
    pub anchor: String,
}

/// Derive a URL-fragment-safe anchor id from heading text.
///
/// Lowercase, characters outside `[a-z0-9\s-]` stripped, whitespace runs
/// collapsed to single hyphens, leading/trailing hyphens trimmed. Pure
/// function: identical text always yields the identical id, so colliding
/// headings collide in their anchors too.
#[must_use]
pub fn anchor_id(text: &str) -> String {
    let filtered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();
    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join("-");
    collapsed.trim_matches('-').to_owned()
}

/// Extract level 1–3 headings from a rendered fragment, in document order.
///
/// Duplicate text at the same level yields duplicate entries (and therefore
/// duplicate anchors); the list is not deduplicated.
#[must_use]
pub fn extract_headings(html: &str) -> Vec<Heading> {
    HEADING_RE
        .captures_iter(html)
        .map(|caps| {
            let level = caps[1].as_bytes()[1] - b'0';
            let text = caps[2].trim().to_owned();
            let anchor = anchor_id(&text);
            Heading {
                level,
                text,
                anchor,
            }
        })
        .collect()
}

/// Rewrite heading blocks in place to carry their anchor ids.
///
/// Injection is first-occurrence-only per (text, level) pair: a duplicate
/// heading at the same level keeps its plain block and receives no id.
#[must_use]
pub fn add_heading_ids(html: &str, headings: &[Heading]) -> String {
    let mut result = html.to_owned();
    let mut seen: HashSet<(u8, &str)> = HashSet::new();

    for heading in headings {
        if !seen.insert((heading.level, heading.text.as_str())) {
            continue;
        }
        let plain = format!(
            r#"<div class="h{}">{}</div>"#,
            heading.level, heading.text
        );
        let anchored = format!(
            r#"<div class="h{}" id="{}">{}</div>"#,
            heading.level, heading.anchor, heading.text
        );
        result = result.replacen(&plain, &anchored, 1);
    }

    result
}

/// Inject a breadcrumb trail as a prefix inside the first article-title
/// block.
///
/// All but the final segment render as inert directory labels; the final
/// segment is the current page label. An empty trail (or a fragment without
/// a title block) leaves the html unchanged.
#[must_use]
pub fn inject_breadcrumb(html: &str, trail: &[String]) -> String {
    let Some((current, directories)) = trail.split_last() else {
        return html.to_owned();
    };

    let mut crumbs = String::from(r#"<div class="breadcrumb">"#);
    for name in directories {
        crumbs.push_str(&format!(
            r#"<span class="breadcrumb-directory">{name}</span><span class="breadcrumb-separator">→</span>"#
        ));
    }
    crumbs.push_str(&format!(
        r#"<span class="breadcrumb-current">{current}</span></div>"#
    ));

    TITLE_RE
        .replace(html, |caps: &regex::Captures<'_>| {
            format!("{}{crumbs}{}{}", &caps[1], &caps[2], &caps[3])
        })
        .into_owned()
}
