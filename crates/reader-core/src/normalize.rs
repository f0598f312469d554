//! Plain-text extraction from XHTML content documents.
//!
//! Documents go through an HTML parser, so broken markup never fails; it
//! is repaired the way a browser would.

use kuchiki::{traits::*, NodeRef};

/// Reduce an XHTML document to a single line of readable text.
///
/// Text nodes are joined with spaces, so adjacent blocks stay apart, and
/// anything inside `script` or `style` is dropped.
pub fn html_to_text(html: &str) -> String {
    let document = kuchiki::parse_html().one(html.to_string());
    let mut text = String::with_capacity(html.len() / 2);
    for node in document.descendants() {
        let Some(chunk) = node.as_text() else {
            continue;
        };
        if is_skipped(&node) {
            continue;
        }
        text.push_str(&chunk.borrow());
        text.push(' ');
    }
    collapse_whitespace(&text)
}

fn is_skipped(node: &NodeRef) -> bool {
    node.ancestors().any(|ancestor| {
        ancestor
            .as_element()
            .is_some_and(|element| is_skipped_element(element.name.local.as_ref()))
    })
}

fn is_skipped_element(name: &str) -> bool {
    matches!(name.to_ascii_lowercase().as_str(), "script" | "style")
}

pub(crate) fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
