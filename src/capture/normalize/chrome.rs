//! Interactive chrome removal.

use kuchikikiki::NodeRef;

use super::{remove_all, Transform};

/// Buttons, copy icons and DeepSeek's icon elements.
const CHROME: &str = "button, svg.copy-icon, ds-icon";

/// Removes controls that only mean something on the live page.
pub struct StripInteractiveChrome;

impl Transform for StripInteractiveChrome {
    fn transform(&self, root: &NodeRef) {
        let removed = remove_all(root, CHROME);
        if removed > 0 {
            tracing::trace!(removed, "stripped interactive chrome");
        }
    }
}
