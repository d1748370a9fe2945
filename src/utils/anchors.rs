//! Anchor extraction and href rewriting over HTML fragments.
//!
//! Fragments are parsed into a full document (`<body>` wraps the fragment) so
//! leading whitespace and text around anchors survive a round trip. The DOM
//! is not `Send`, so it never outlives a single call: extraction and rewriting
//! each parse the fragment and anchors are re-targeted by their position in
//! document order, which is deterministic for the same input.

use std::collections::HashMap;

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use thiserror::Error;

const ANCHOR_SELECTOR: &str = "a[href]";

/// Errors raised while walking or serializing a parsed fragment.
#[derive(Debug, Error)]
pub enum HtmlError {
    #[error("Invalid selector: {0}")]
    Selector(&'static str),

    #[error("Parsed document has no body element")]
    MissingBody,

    #[error("Failed to serialize HTML: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("Serialized HTML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// An `<a href>` element found in a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorOccurrence {
    pub href: String,
    /// Concatenated text content of the element.
    pub text: String,
    /// Index among all `<a href>` elements, in document order.
    pub position: usize,
}

fn parse_fragment(html: &str) -> NodeRef {
    kuchiki::parse_html().one(format!(
        "<!DOCTYPE html><html><head></head><body>{html}</body></html>"
    ))
}

fn select_anchors(document: &NodeRef) -> Result<Vec<NodeRef>, HtmlError> {
    Ok(document
        .select(ANCHOR_SELECTOR)
        .map_err(|()| HtmlError::Selector(ANCHOR_SELECTOR))?
        .map(|anchor| anchor.as_node().clone())
        .collect())
}

fn href_of(anchor: &NodeRef) -> String {
    anchor
        .as_element()
        .and_then(|element| element.attributes.borrow().get("href").map(str::to_string))
        .unwrap_or_default()
}

/// Extracts every anchor that carries an `href` attribute, in document order.
pub fn extract_anchors(html: &str) -> Result<Vec<AnchorOccurrence>, HtmlError> {
    let document = parse_fragment(html);

    Ok(select_anchors(&document)?
        .iter()
        .enumerate()
        .map(|(position, anchor)| AnchorOccurrence {
            href: href_of(anchor),
            text: anchor.text_contents(),
            position,
        })
        .collect())
}

/// Sets the href of the anchors at the given positions and serializes the
/// fragment back to HTML.
///
/// Anchors whose position is not in `replacements` keep all of their
/// attributes and content. Positions refer to [`AnchorOccurrence::position`]
/// as produced by [`extract_anchors`] for the same `html`.
pub fn rewrite_hrefs(
    html: &str,
    replacements: &HashMap<usize, String>,
) -> Result<String, HtmlError> {
    let document = parse_fragment(html);

    // Collect first so attribute borrows never overlap the selector iterator.
    let anchors = select_anchors(&document)?;

    for (position, anchor) in anchors.iter().enumerate() {
        if let (Some(new_href), Some(element)) = (replacements.get(&position), anchor.as_element())
        {
            element
                .attributes
                .borrow_mut()
                .insert("href", new_href.clone());
        }
    }

    serialize_body(&document)
}

/// Serializes the children of `<body>`, i.e. the original fragment.
fn serialize_body(document: &NodeRef) -> Result<String, HtmlError> {
    let body = document
        .select_first("body")
        .map_err(|()| HtmlError::MissingBody)?;

    let mut html_output = Vec::new();
    for child in body.as_node().children() {
        child.serialize(&mut html_output)?;
    }

    Ok(String::from_utf8(html_output)?)
}
