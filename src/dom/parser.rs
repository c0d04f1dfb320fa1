//! HTML parser front end
//!
//! Wraps `scraper` and copies its tree into owned [`PageNode`] values.
//! Comments, doctypes and processing instructions are dropped.

use crate::dom::{Document, ElementNode, PageNode};
use crate::ParseError;
use scraper::{ElementRef, Html};

/// Parses an HTML body into a [`Document`]
///
/// `content_type` is the response's Content-Type header, when known. Bodies
/// declared as something other than HTML or XHTML are rejected; the parser
/// itself is error-tolerant and accepts any markup.
///
/// # Example
///
/// ```
/// use link_sleuth::dom::parse_html;
///
/// let doc = parse_html(r#"<p><a href="/x">X</a></p>"#, Some("text/html")).unwrap();
/// assert_eq!(doc.children.len(), 1);
///
/// assert!(parse_html("%PDF-1.7", Some("application/pdf")).is_err());
/// ```
pub fn parse_html(body: &str, content_type: Option<&str>) -> Result<Document, ParseError> {
    if let Some(content_type) = content_type {
        if !is_markup(content_type) {
            return Err(ParseError::ContentMismatch {
                content_type: content_type.to_string(),
            });
        }
    }

    let html = Html::parse_document(body);
    Ok(Document {
        children: vec![convert_element(html.root_element())],
    })
}

/// Whether a Content-Type header value declares HTML or XHTML
pub(crate) fn is_markup(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("xhtml")
}

fn convert_element(element: ElementRef<'_>) -> PageNode {
    let value = element.value();
    let mut children = Vec::new();

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            children.push(convert_element(child_element));
        } else if let Some(text) = child.value().as_text() {
            let content: &str = text;
            children.push(PageNode::Text(content.to_string()));
        }
    }

    PageNode::Element(ElementNode {
        tag: value.name().to_string(),
        attributes: value
            .attrs()
            .map(|(key, val)| (key.to_string(), val.to_string()))
            .collect(),
        children,
    })
}
