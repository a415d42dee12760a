//! Small DOM helpers on top of `kuchikikiki`.

use kuchikikiki::traits::*;
use kuchikikiki::{NodeData, NodeRef, Selectors};

/// Compile a selector list, logging instead of failing on invalid input.
fn compile(selector: &str) -> Option<Selectors> {
    match Selectors::compile(selector) {
        Ok(selectors) => Some(selectors),
        Err(()) => {
            tracing::warn!(selector, "invalid CSS selector");
            None
        }
    }
}

/// All descendant elements of `node` matching `selector`, in document order.
///
/// Like `querySelectorAll`, the node itself is never part of the result.
pub fn query_all(node: &NodeRef, selector: &str) -> Vec<NodeRef> {
    let Some(selectors) = compile(selector) else {
        return Vec::new();
    };

    node.descendants()
        .elements()
        .filter(|element| selectors.matches(element))
        .map(|element| element.as_node().clone())
        .collect()
}

/// First descendant element of `node` matching `selector`.
pub fn query_first(node: &NodeRef, selector: &str) -> Option<NodeRef> {
    let selectors = compile(selector)?;

    node.descendants()
        .elements()
        .find(|element| selectors.matches(element))
        .map(|element| element.as_node().clone())
}

/// Whether any descendant of `node` matches `selector`.
pub fn has_match(node: &NodeRef, selector: &str) -> bool {
    query_first(node, selector).is_some()
}

/// Lowercase local tag name, or `None` for non-element nodes.
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element()
        .map(|element| element.name.local.to_ascii_lowercase().to_string())
}

/// Value of an attribute on an element node.
pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    let element = node.as_element()?;
    let attributes = element.attributes.borrow();
    attributes.get(name).map(str::to_string)
}

/// Deep copy of a subtree, detached from any document.
///
/// Comments, doctypes and processing instructions are dropped; they carry
/// nothing an export needs.
pub fn deep_clone(node: &NodeRef) -> NodeRef {
    let copy = match node.data() {
        NodeData::Element(element) => {
            let attributes = element
                .attributes
                .borrow()
                .map
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect::<Vec<_>>();
            NodeRef::new_element(element.name.clone(), attributes)
        }
        NodeData::Text(text) => return NodeRef::new_text(text.borrow().clone()),
        NodeData::Document(_) | NodeData::DocumentFragment => NodeRef::new_document(),
        NodeData::Comment(_) | NodeData::ProcessingInstruction(_) | NodeData::Doctype(_) => {
            return NodeRef::new_text(String::new());
        }
    };

    for child in node.children() {
        if matches!(
            child.data(),
            NodeData::Comment(_) | NodeData::ProcessingInstruction(_) | NodeData::Doctype(_)
        ) {
            continue;
        }
        copy.append(deep_clone(&child));
    }
    copy
}

/// Serialized markup of the node's children (the DOM's `innerHTML`).
pub fn inner_html(node: &NodeRef) -> String {
    node.children().map(|child| child.to_string()).collect()
}

/// Parse a complete HTML document.
pub fn parse_document(html: &str) -> NodeRef {
    kuchikikiki::parse_html().one(html)
}
