//! Navigation tree building.
//!
//! Discovers documents through storage, filters out documents with broken
//! board references, and arranges the rest into an ordered sidebar forest.
//! Ordering tables are injectable configuration ([`NavOrdering`]); the
//! production tables are the `Default`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tspin_board::BoardStore;
use tspin_storage::{PAGE_FILE, Storage};

/// Advisory re-parse of board placeholders, independent of the render path.
static BOARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\[\s*(BOARD|BOARDS)\s*:\s*([^\]]+?)\s*\]\]").unwrap()
});

/// A node in the sidebar tree.
///
/// Directories own their children; pages are leaves. Serialized with a
/// `type` tag (`"dir"` / `"page"`) for the template layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    /// Directory bucket.
    Dir {
        /// Display name (hyphens → spaces, title-cased; `"Root"` for the
        /// synthetic top-level bucket).
        name: String,
        /// Raw path segment the bucket was keyed on.
        key: String,
        /// Subdirectories first, then pages.
        children: Vec<NavNode>,
    },
    /// Document leaf.
    Page {
        /// Display name derived from the final path segment.
        name: String,
        /// Full document path.
        path: String,
    },
}

/// Ordering configuration for the navigation tree.
///
/// Both tables match keys case-insensitively against raw path segments.
/// Entries absent from a table sort after the listed ones, alphabetically
/// by display name (pages) or key (top-level directories).
#[derive(Clone, Debug)]
pub struct NavOrdering {
    /// Top-level directory keys in display order.
    pub top_level: Vec<String>,
    /// Per-directory page order, matched by the page's final path segment.
    pub page_order: Vec<(String, Vec<String>)>,
}

impl NavOrdering {
    /// Empty ordering: everything sorts alphabetically.
    #[must_use]
    pub fn unordered() -> Self {
        Self {
            top_level: Vec::new(),
            page_order: Vec::new(),
        }
    }

    fn page_order_for(&self, dir_key: &str) -> Option<&[String]> {
        self.page_order
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(dir_key))
            .map(|(_, order)| order.as_slice())
    }
}

impl Default for NavOrdering {
    /// Production ordering for the guide content tree.
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
        Self {
            top_level: owned(&[
                "Basics",
                "Single Double",
                "Double Double",
                "Double Triple",
                "Super T-Spin Double",
                "Imperial Cross",
                "C-Spin",
                "Advanced",
            ]),
            page_order: vec![
                ("Basics".to_owned(), owned(&["Overview", "T-Spin Double", "T-Spin Triple"])),
                ("Single Double".to_owned(), owned(&["Main setup"])),
                (
                    "Double Double".to_owned(),
                    owned(&["Fractal", "Cut Copy", "STSD & Imperial Cross"]),
                ),
                (
                    "Double Triple".to_owned(),
                    owned(&["DT Cannon", "DT Cannon 2", "BT Cannon"]),
                ),
                (
                    "Super T-Spin Double".to_owned(),
                    owned(&["Main setup", "Used in spliced setups"]),
                ),
                (
                    "Imperial Cross".to_owned(),
                    owned(&["Main setup", "Used in spliced setups"]),
                ),
                ("C-Spin".to_owned(), owned(&["Main setup"])),
                (
                    "Advanced".to_owned(),
                    owned(&[
                        "Spliced STSD variants",
                        "Sandwhiching a setup with notch and base",
                        "Sandwhiching a T-Spin Triple",
                        "Layering a setup on top of a setup",
                        "Sandwhiching a set up inside a setup",
                    ]),
                ),
            ],
        }
    }
}

/// Derive a display name from a path segment: hyphens become spaces, words
/// are title-cased.
pub(crate) fn display_name(segment: &str) -> String {
    segment
        .replace('-', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check whether every board a document references exists in storage.
///
/// Re-parses placeholder syntax on the raw source, independently of the
/// render path. Purely advisory: `false` hides the document from the
/// navigation tree but never blocks direct rendering, and any failure
/// during the check (unreadable file included) counts as "not displayable"
/// rather than an error, so a broken document can never abort tree
/// construction.
pub(crate) fn has_valid_boards(storage: &dyn Storage, document_path: &str) -> bool {
    let page_path = format!("{document_path}/{PAGE_FILE}");
    let Ok(content) = storage.read(&page_path) else {
        tracing::warn!(document = %document_path, "Validity check could not read page source");
        return false;
    };

    for caps in BOARD_RE.captures_iter(&content) {
        for filename in caps[2].split(',').map(str::trim).filter(|f| !f.is_empty()) {
            if !storage.exists(&BoardStore::board_path(document_path, filename)) {
                tracing::debug!(
                    document = %document_path,
                    board = %filename,
                    "Hiding document with missing board reference"
                );
                return false;
            }
        }
    }
    true
}

struct PageEntry {
    segment: String,
    name: String,
    path: String,
}

struct SubDir {
    key: String,
    name: String,
    pages: Vec<PageEntry>,
}

struct TopDir {
    key: String,
    name: String,
    subdirs: Vec<SubDir>,
    pages: Vec<PageEntry>,
}

/// Build the ordered sidebar forest from a list of document paths.
///
/// Path depth maps to tree shape: one segment lands under the synthetic
/// `root` bucket, two segments under a top-level directory, three or more
/// under a top-level directory plus one subdirectory — only the first two
/// segments become directory keys, the final segment names the page.
pub(crate) fn build_tree(pages: &[String], ordering: &NavOrdering) -> Vec<NavNode> {
    let mut tops: Vec<TopDir> = Vec::new();

    for path in pages {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((&segment, _)) = parts.split_last() else {
            continue;
        };
        let (top_key, sub_key) = match parts.len() {
            1 => ("root", None),
            2 => (parts[0], None),
            _ => (parts[0], Some(parts[1])),
        };

        let top_idx = tops.iter().position(|t| t.key == top_key).unwrap_or_else(|| {
            tops.push(TopDir {
                key: top_key.to_owned(),
                name: if top_key == "root" {
                    "Root".to_owned()
                } else {
                    display_name(top_key)
                },
                subdirs: Vec::new(),
                pages: Vec::new(),
            });
            tops.len() - 1
        });
        let top = &mut tops[top_idx];

        let entry = PageEntry {
            segment: segment.to_owned(),
            name: display_name(segment),
            path: path.clone(),
        };

        match sub_key {
            Some(sub) => {
                let sub_idx = top.subdirs.iter().position(|s| s.key == sub).unwrap_or_else(|| {
                    top.subdirs.push(SubDir {
                        key: sub.to_owned(),
                        name: display_name(sub),
                        pages: Vec::new(),
                    });
                    top.subdirs.len() - 1
                });
                top.subdirs[sub_idx].pages.push(entry);
            }
            None => top.pages.push(entry),
        }
    }

    // Order within each directory: subdirectories alphabetical by display
    // name, pages per override list then alphabetical stragglers.
    for top in &mut tops {
        top.subdirs
            .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        for sub in &mut top.subdirs {
            order_pages(&mut sub.pages, &sub.key, ordering);
        }
        order_pages(&mut top.pages, &top.key, ordering);
    }

    // Top-level directories in configured order, stragglers after,
    // alphabetically by key.
    let mut ordered: Vec<TopDir> = Vec::new();
    for want in &ordering.top_level {
        if let Some(pos) = tops.iter().position(|t| t.key.eq_ignore_ascii_case(want)) {
            ordered.push(tops.remove(pos));
        }
    }
    tops.sort_by(|a, b| a.key.cmp(&b.key));
    ordered.extend(tops);

    ordered.into_iter().map(into_nav).collect()
}

fn order_pages(pages: &mut Vec<PageEntry>, dir_key: &str, ordering: &NavOrdering) {
    if let Some(order) = ordering.page_order_for(dir_key) {
        let mut result = Vec::with_capacity(pages.len());
        for want in order {
            if let Some(pos) = pages
                .iter()
                .position(|p| p.segment.eq_ignore_ascii_case(want))
            {
                result.push(pages.remove(pos));
            }
        }
        pages.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        result.append(pages);
        *pages = result;
    } else {
        pages.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }
}

fn into_nav(top: TopDir) -> NavNode {
    let mut children: Vec<NavNode> = top
        .subdirs
        .into_iter()
        .map(|sub| NavNode::Dir {
            name: sub.name,
            key: sub.key,
            children: sub.pages.into_iter().map(page_node).collect(),
        })
        .collect();
    children.extend(top.pages.into_iter().map(page_node));

    NavNode::Dir {
        name: top.name,
        key: top.key,
        children,
    }
}

fn page_node(entry: PageEntry) -> NavNode {
    NavNode::Page {
        name: entry.name,
        path: entry.path,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tspin_storage::MockStorage;

    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn child_names(node: &NavNode) -> Vec<String> {
        match node {
            NavNode::Dir { children, .. } => children
                .iter()
                .map(|c| match c {
                    NavNode::Dir { name, .. } | NavNode::Page { name, .. } => name.clone(),
                })
                .collect(),
            NavNode::Page { .. } => Vec::new(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("t-spin-double"), "T Spin Double");
        assert_eq!(display_name("overview"), "Overview");
        assert_eq!(display_name("dt-cannon"), "Dt Cannon");
    }

    #[test]
    fn test_single_segment_lands_under_root() {
        let tree = build_tree(&paths(&["demo"]), &NavOrdering::unordered());

        assert_eq!(tree.len(), 1);
        let NavNode::Dir { name, key, children } = &tree[0] else {
            panic!("expected dir");
        };
        assert_eq!(name, "Root");
        assert_eq!(key, "root");
        assert_eq!(
            children[0],
            NavNode::Page {
                name: "Demo".to_owned(),
                path: "demo".to_owned(),
            }
        );
    }

    #[test]
    fn test_two_segments_make_top_dir_and_page() {
        let tree = build_tree(&paths(&["basics/overview"]), &NavOrdering::unordered());

        let NavNode::Dir { name, children, .. } = &tree[0] else {
            panic!("expected dir");
        };
        assert_eq!(name, "Basics");
        assert_eq!(
            children[0],
            NavNode::Page {
                name: "Overview".to_owned(),
                path: "basics/overview".to_owned(),
            }
        );
    }

    #[test]
    fn test_deep_paths_collapse_to_two_directory_levels() {
        let tree = build_tree(
            &paths(&["advanced/stacking/deep/variants"]),
            &NavOrdering::unordered(),
        );

        let NavNode::Dir { key, children, .. } = &tree[0] else {
            panic!("expected dir");
        };
        assert_eq!(key, "advanced");
        let NavNode::Dir { key: sub_key, children: sub_children, .. } = &children[0] else {
            panic!("expected subdir");
        };
        // Only the first two segments become directories; the page keeps its
        // full path and is named after the final segment.
        assert_eq!(sub_key, "stacking");
        assert_eq!(
            sub_children[0],
            NavNode::Page {
                name: "Variants".to_owned(),
                path: "advanced/stacking/deep/variants".to_owned(),
            }
        );
    }

    #[test]
    fn test_subdirectories_sort_before_pages_alphabetically() {
        let tree = build_tree(
            &paths(&["top/zeta", "top/beta/page-b", "top/alpha/page-a"]),
            &NavOrdering::unordered(),
        );

        assert_eq!(child_names(&tree[0]), vec!["Alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn test_page_override_order_applies() {
        let ordering = NavOrdering {
            top_level: Vec::new(),
            page_order: vec![(
                "Basics".to_owned(),
                vec![
                    "Overview".to_owned(),
                    "T-Spin Double".to_owned(),
                    "T-Spin Triple".to_owned(),
                ],
            )],
        };
        let tree = build_tree(
            &paths(&["basics/aaa-first-alphabetically", "basics/overview"]),
            &ordering,
        );

        // "overview" matches the override case-insensitively and sorts
        // first; unlisted pages follow alphabetically.
        assert_eq!(
            child_names(&tree[0]),
            vec!["Overview", "Aaa First Alphabetically"]
        );
    }

    #[test]
    fn test_pages_without_override_sort_alphabetically() {
        let tree = build_tree(
            &paths(&["misc/zeta", "misc/alpha", "misc/beta"]),
            &NavOrdering::unordered(),
        );

        assert_eq!(child_names(&tree[0]), vec!["Alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn test_top_level_order_with_stragglers() {
        let ordering = NavOrdering {
            top_level: vec!["Basics".to_owned(), "Advanced".to_owned()],
            page_order: Vec::new(),
        };
        let tree = build_tree(
            &paths(&["zeta/p", "advanced/p", "alpha/p", "basics/p"]),
            &ordering,
        );

        let keys: Vec<&str> = tree
            .iter()
            .map(|node| match node {
                NavNode::Dir { key, .. } => key.as_str(),
                NavNode::Page { .. } => panic!("expected dir"),
            })
            .collect();
        assert_eq!(keys, vec!["basics", "advanced", "alpha", "zeta"]);
    }

    #[test]
    fn test_default_ordering_carries_production_tables() {
        let ordering = NavOrdering::default();

        assert_eq!(ordering.top_level[0], "Basics");
        assert_eq!(
            ordering.page_order_for("basics").unwrap()[0],
            "Overview"
        );
        assert!(ordering.page_order_for("unknown-dir").is_none());
    }

    #[test]
    fn test_serialization_shape() {
        let tree = build_tree(&paths(&["basics/overview"]), &NavOrdering::unordered());
        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json[0]["type"], "dir");
        assert_eq!(json[0]["children"][0]["type"], "page");
        assert_eq!(json[0]["children"][0]["path"], "basics/overview");
    }

    #[test]
    fn test_has_valid_boards_all_present() {
        let storage = MockStorage::new()
            .with_page("doc", "[[BOARD: a.txt]]\n[[BOARDS: b.txt, c.txt]]")
            .with_board("doc", "a.txt", "grid")
            .with_board("doc", "b.txt", "grid")
            .with_board("doc", "c.txt", "grid");

        assert!(has_valid_boards(&storage, "doc"));
    }

    #[test]
    fn test_has_valid_boards_missing_reference() {
        let storage = MockStorage::new().with_page("doc", "[[BOARD: missing.txt]]");

        assert!(!has_valid_boards(&storage, "doc"));
    }

    #[test]
    fn test_has_valid_boards_unreadable_page_counts_as_invalid() {
        let storage = MockStorage::new();

        assert!(!has_valid_boards(&storage, "doc"));
    }

    #[test]
    fn test_has_valid_boards_no_placeholders() {
        let storage = MockStorage::new().with_page("doc", "plain text only");

        assert!(has_valid_boards(&storage, "doc"));
    }
}
