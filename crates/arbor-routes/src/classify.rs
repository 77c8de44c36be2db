//! Path classification: which slot a route file fills and which half it provides.
//!
//! Classification only looks at the file name. Directory structure is handled by
//! the tree builder.

use once_cell::sync::Lazy;
use regex::Regex;

static TEST_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\.|_)test\.(?:js|jsx|ts|tsx)$").expect("valid test pattern"));

/// Base names starting with this character never become routes.
pub const IGNORE_SENTINEL: char = '_';

/// Directory name marking the catch-all branch of a node.
pub const WILDCARD_SEGMENT: &str = "[...]";

const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];
const VIEW_EXTENSIONS: &[&str] = &["jsx", "tsx"];

/// Which part of a route node a file occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    /// `main.*`: wraps every descendant of the directory
    Layout,
    /// `index.*`: matches the directory's own path
    Index,
    /// Any other base name: a child node fully owned by this file
    Leaf(String),
}

/// Whether a file renders UI or handles requests on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Half {
    View,
    Handler,
}

/// Why a file was left out of the route tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Matches the test-file pattern
    Test,
    /// Base name starts with the ignore sentinel
    Ignored,
    /// Not a recognized source extension
    Unsupported,
}

/// Outcome of classifying one file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Route { slot: SlotKind, half: Half },
    Skip(SkipReason),
}

/// Classify a file by its name (base name plus extension).
///
/// Rules apply in order: test files and sentinel-prefixed names are skipped,
/// then unsupported extensions, then the extension picks the half and the base
/// name picks the slot.
pub fn classify(file_name: &str) -> Classification {
    if TEST_FILE.is_match(file_name) {
        return Classification::Skip(SkipReason::Test);
    }

    let Some((stem, ext)) = file_name.rsplit_once('.') else {
        return Classification::Skip(SkipReason::Unsupported);
    };

    if stem.starts_with(IGNORE_SENTINEL) {
        return Classification::Skip(SkipReason::Ignored);
    }
    if stem.is_empty() || !SOURCE_EXTENSIONS.contains(&ext) {
        return Classification::Skip(SkipReason::Unsupported);
    }

    let half = if VIEW_EXTENSIONS.contains(&ext) {
        Half::View
    } else {
        Half::Handler
    };

    let slot = match stem {
        "main" => SlotKind::Layout,
        "index" => SlotKind::Index,
        other => SlotKind::Leaf(other.to_string()),
    };

    Classification::Route { slot, half }
}

/// Render a segment for the client router: `[id]` → `:id`, `[...]` → `*`.
pub fn client_segment(name: &str) -> String {
    render_segment(name, "*")
}

/// Render a segment for the server matcher: `[id]` → `:id`, `[...]` → `(.*)`.
pub fn server_segment(name: &str) -> String {
    render_segment(name, "(.*)")
}

fn render_segment(name: &str, wildcard: &str) -> String {
    if name == WILDCARD_SEGMENT {
        return wildcard.to_string();
    }
    match name.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(param) if !param.is_empty() => format!(":{param}"),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(slot: SlotKind, half: Half) -> Classification {
        Classification::Route { slot, half }
    }

    #[test]
    fn test_layout_and_index() {
        assert_eq!(classify("main.tsx"), route(SlotKind::Layout, Half::View));
        assert_eq!(classify("main.ts"), route(SlotKind::Layout, Half::Handler));
        assert_eq!(classify("index.jsx"), route(SlotKind::Index, Half::View));
        assert_eq!(classify("index.js"), route(SlotKind::Index, Half::Handler));
    }

    #[test]
    fn test_leaf() {
        assert_eq!(
            classify("about.tsx"),
            route(SlotKind::Leaf("about".into()), Half::View)
        );
        assert_eq!(
            classify("[id].ts"),
            route(SlotKind::Leaf("[id]".into()), Half::Handler)
        );
    }

    #[test]
    fn test_skips() {
        assert_eq!(classify("index.test.tsx"), Classification::Skip(SkipReason::Test));
        assert_eq!(classify("main_test.ts"), Classification::Skip(SkipReason::Test));
        assert_eq!(classify("_main.tsx"), Classification::Skip(SkipReason::Ignored));
        assert_eq!(classify("_helpers.ts"), Classification::Skip(SkipReason::Ignored));
        assert_eq!(classify("styles.css"), Classification::Skip(SkipReason::Unsupported));
        assert_eq!(classify("README"), Classification::Skip(SkipReason::Unsupported));
    }

    #[test]
    fn test_classification_is_stable() {
        for name in ["main.tsx", "index.ts", "blog.jsx", "_x.ts", "a.test.ts"] {
            assert_eq!(classify(name), classify(name));
        }
    }

    #[test]
    fn test_segments_diverge_only_on_wildcard() {
        assert_eq!(client_segment("[...]"), "*");
        assert_eq!(server_segment("[...]"), "(.*)");
        assert_eq!(client_segment("[id]"), ":id");
        assert_eq!(server_segment("[id]"), ":id");
        assert_eq!(client_segment("about"), "about");
        assert_eq!(server_segment("about"), "about");
    }
}
