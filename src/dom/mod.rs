//! Page tree module
//!
//! Parsed pages are converted from the HTML parser's arena into an owned tree
//! of [`PageNode`] values, which the crawler walks in document order.
//!
//! # Components
//!
//! - `parser`: Converts an HTML body into a [`Document`]
//! - `text`: Text extraction and display truncation

mod parser;
mod text;

pub(crate) use parser::is_markup;
pub use parser::parse_html;
pub use text::{extract_text, truncate, MAX_MATCH_LEN};

/// Elements whose text content is never searched
const NON_SEARCHABLE_TAGS: &[&str] = &["script", "style"];

/// A node of a parsed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageNode {
    Element(ElementNode),
    Text(String),
}

/// An element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Lowercase tag name
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<PageNode>,
}

impl ElementNode {
    /// Returns the value of the first attribute named `name`
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A parsed page: the top-level nodes of the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<PageNode>,
}

/// What the walker reports for each interesting node
#[derive(Debug, Clone, Copy)]
pub enum Visit<'a> {
    /// An `<a>` element carrying an `href` attribute
    Anchor {
        href: &'a str,
        element: &'a ElementNode,
    },
    /// A text node, with the tag of its parent element (if any)
    Text {
        content: &'a str,
        parent_tag: Option<&'a str>,
    },
}

impl Visit<'_> {
    /// Returns true for text nodes that live outside `<script>` and `<style>`
    pub fn is_searchable_text(&self) -> bool {
        match self {
            Visit::Text { parent_tag, .. } => {
                !parent_tag.is_some_and(|tag| NON_SEARCHABLE_TAGS.contains(&tag))
            }
            Visit::Anchor { .. } => false,
        }
    }
}

impl Document {
    /// Walks the document depth-first in pre-order
    ///
    /// The visitor sees each anchor before its descendants, so text inside
    /// an anchor is reported after the anchor itself.
    pub fn walk<'a, F>(&'a self, visitor: &mut F)
    where
        F: FnMut(Visit<'a>),
    {
        for child in &self.children {
            walk_node(child, None, visitor);
        }
    }
}

fn walk_node<'a, F>(node: &'a PageNode, parent_tag: Option<&'a str>, visitor: &mut F)
where
    F: FnMut(Visit<'a>),
{
    match node {
        PageNode::Text(content) => visitor(Visit::Text {
            content: content.as_str(),
            parent_tag,
        }),
        PageNode::Element(element) => {
            if element.tag == "a" {
                if let Some(href) = element.attr("href") {
                    visitor(Visit::Anchor { href, element });
                }
            }
            for child in &element.children {
                walk_node(child, Some(element.tag.as_str()), visitor);
            }
        }
    }
}
