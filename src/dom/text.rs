use crate::dom::{ElementNode, PageNode};

/// Longest match text reported, in characters
pub const MAX_MATCH_LEN: usize = 200;

const ELLIPSIS: &str = "...";

/// Collects all descendant text of a node into one string
///
/// Each text fragment is trimmed; non-empty fragments are joined with a
/// single space in document order. Returns an empty string when the
/// subtree holds no non-whitespace text.
pub fn extract_text(node: &PageNode) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

impl ElementNode {
    /// Descendant text of this element, as [`extract_text`] builds it
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            collect_text(child, &mut out);
        }
        out
    }
}

fn collect_text(node: &PageNode, out: &mut String) {
    match node {
        PageNode::Text(content) => {
            let fragment = content.trim();
            if !fragment.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(fragment);
            }
        }
        PageNode::Element(element) => {
            for child in &element.children {
                collect_text(child, out);
            }
        }
    }
}

/// Shortens text to at most `limit` characters
///
/// Text within the limit is returned unchanged. Longer text keeps its first
/// `limit - 3` characters followed by `...`. Lengths count `char`s, so a
/// cut never splits a code point.
///
/// # Examples
///
/// ```
/// use link_sleuth::dom::truncate;
///
/// assert_eq!(truncate("short", 200), "short");
/// let long = "a".repeat(203);
/// let cut = truncate(&long, 200);
/// assert_eq!(cut.chars().count(), 200);
/// assert!(cut.ends_with("..."));
/// ```
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
