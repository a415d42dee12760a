//! KaTeX math transforms.
//!
//! KaTeX renders every formula twice: a `.katex-html` layer drawn with its
//! own web fonts and a `.katex-mathml` layer holding native MathML that is
//! clipped out of view. Outside the chat page the fonts are gone, so the
//! visual layer turns into garbled glyphs while MathML renders natively.

use kuchikikiki::NodeRef;

use super::{remove_all, Transform};
use crate::page::dom::query_all;

/// Selector of KaTeX's font-dependent visual layer.
const VISUAL_LAYER: &str = ".katex-html";

/// Selector of KaTeX's MathML layer.
const SEMANTIC_LAYER: &str = ".katex-mathml";

/// Inline style forcing the MathML layer to render in flow.
pub const MATHML_STYLE: &str = "position: static !important; clip: auto !important; width: auto !important; height: auto !important; overflow: visible !important; display: inline-block !important; border: 0 !important; padding: 0 !important; margin: 0 !important; font-size: 1.1em;";

/// Removes every `.katex-html` element.
pub struct StripMathVisualLayer;

impl Transform for StripMathVisualLayer {
    fn transform(&self, root: &NodeRef) {
        let removed = remove_all(root, VISUAL_LAYER);
        if removed > 0 {
            tracing::trace!(removed, "stripped math visual layers");
        }
    }
}

/// Unhides `.katex-mathml` elements.
///
/// The class that clips the element is dropped and an inline style makes it
/// visible, inline and slightly larger than the surrounding text.
pub struct RevealSemanticMath;

impl Transform for RevealSemanticMath {
    fn transform(&self, root: &NodeRef) {
        for node in query_all(root, SEMANTIC_LAYER) {
            if let Some(element) = node.as_element() {
                let mut attributes = element.attributes.borrow_mut();
                attributes.remove("class");
                attributes.insert("style", MATHML_STYLE.to_string());
            }
        }
    }
}
