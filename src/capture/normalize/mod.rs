//! Content normalization for export-safe markup.
//!
//! Captured markup has to render in a standalone document that has none of
//! the chat site's stylesheets, fonts or scripts. The normalizer copies the
//! subtree (the live page is never touched) and runs a fixed list of
//! transforms over the copy:
//!
//! - [`StripMathVisualLayer`] removes KaTeX's font-dependent visual layer
//! - [`RevealSemanticMath`] makes the hidden MathML representation visible
//! - [`StripInteractiveChrome`] removes buttons and icons
//!
//! Every transform is idempotent, so normalizing already normalized markup
//! is a no-op.

mod chrome;
mod math;

pub use chrome::StripInteractiveChrome;
pub use math::{RevealSemanticMath, StripMathVisualLayer, MATHML_STYLE};

use kuchikikiki::NodeRef;

use crate::page::dom::{deep_clone, inner_html, parse_document, query_first};

/// A single in-place rewrite of a detached DOM subtree.
pub trait Transform {
    fn transform(&self, root: &NodeRef);
}

/// Runs the normalization transforms over a copy of a subtree.
pub struct ContentNormalizer {
    transforms: Vec<Box<dyn Transform>>,
}

impl ContentNormalizer {
    /// Create a normalizer with the standard transform order.
    pub fn new() -> Self {
        Self {
            transforms: vec![
                Box::new(StripMathVisualLayer),
                Box::new(RevealSemanticMath),
                Box::new(StripInteractiveChrome),
            ],
        }
    }

    /// Create with specific transforms (for testing).
    pub fn with_transforms(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }

    /// Normalize `element` and return the inner markup of the cleaned copy.
    pub fn normalize(&self, element: &NodeRef) -> String {
        let copy = deep_clone(element);
        for transform in &self.transforms {
            transform.transform(&copy);
        }
        inner_html(&copy)
    }

    /// Normalize a markup fragment.
    pub fn normalize_fragment(&self, html: &str) -> String {
        let document = parse_document(html);
        match query_first(&document, "body") {
            Some(body) => self.normalize(&body),
            None => String::new(),
        }
    }
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Detach every descendant of `root` matching `selector`.
pub(crate) fn remove_all(root: &NodeRef, selector: &str) -> usize {
    let matches = crate::page::dom::query_all(root, selector);
    let count = matches.len();
    for node in matches {
        node.detach();
    }
    count
}
