//! Visible text extraction and whitespace normalization.
//!
//! Approximates what a browser renders as the text of an element: hidden
//! subtrees are skipped, block boundaries become line breaks and runs of
//! whitespace collapse the way CSS `white-space: normal` collapses them.

use kuchikikiki::{NodeData, NodeRef};

use super::dom::{attr, tag_name};

/// Elements whose content is never rendered as text.
const NON_RENDERED: &[&str] = &[
    "script", "style", "noscript", "template", "head", "annotation", "annotation-xml",
];

/// Block elements separated from their siblings by a blank line.
const PARAGRAPH_BLOCKS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "blockquote", "ul", "ol", "table", "hr",
];

/// Block elements separated from their siblings by a single line break.
const LINE_BLOCKS: &[&str] = &[
    "div", "li", "tr", "section", "article", "header", "footer", "main", "aside", "nav",
    "figure", "figcaption", "dl", "dt", "dd", "details", "summary", "form", "fieldset", "address",
];

/// Visible text of `node`, whitespace-normalized and trimmed.
pub fn visible_text(node: &NodeRef) -> String {
    let mut collector = TextCollector::default();
    for child in node.children() {
        collector.visit(&child);
    }
    normalize_whitespace(&collector.out, 2)
}

#[derive(Default)]
struct TextCollector {
    out: String,
    pre_depth: usize,
}

impl TextCollector {
    fn visit(&mut self, node: &NodeRef) {
        match node.data() {
            NodeData::Text(text) => {
                let text = text.borrow();
                if self.pre_depth > 0 {
                    self.out.push_str(&text);
                } else {
                    self.push_collapsed(&text);
                }
            }
            NodeData::Element(_) => self.visit_element(node),
            _ => {}
        }
    }

    fn visit_element(&mut self, node: &NodeRef) {
        let tag = tag_name(node).unwrap_or_default();
        if NON_RENDERED.contains(&tag.as_str()) {
            return;
        }
        if attr(node, "aria-hidden").as_deref() == Some("true") || attr(node, "hidden").is_some() {
            return;
        }

        if tag == "br" {
            self.out.push('\n');
            return;
        }

        let breaks = if PARAGRAPH_BLOCKS.contains(&tag.as_str()) {
            2
        } else if LINE_BLOCKS.contains(&tag.as_str()) {
            1
        } else {
            0
        };

        self.ensure_breaks(breaks);
        if tag == "pre" {
            self.pre_depth += 1;
        }
        for child in node.children() {
            self.visit(&child);
        }
        if tag == "pre" {
            self.pre_depth -= 1;
        }
        self.ensure_breaks(breaks);

        if tag == "td" || tag == "th" {
            self.out.push('\t');
        }
    }

    /// Append collapsed text, dropping leading whitespace at a line start.
    fn push_collapsed(&mut self, text: &str) {
        let mut pending_space = false;
        for c in text.chars() {
            if c.is_whitespace() {
                pending_space = true;
                continue;
            }
            if pending_space && !self.at_line_start() && !self.out.ends_with([' ', '\t']) {
                self.out.push(' ');
            }
            pending_space = false;
            self.out.push(c);
        }
        if pending_space && !self.at_line_start() && !self.out.ends_with([' ', '\t']) {
            self.out.push(' ');
        }
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    /// Make sure the output ends with at least `count` line breaks.
    fn ensure_breaks(&mut self, count: usize) {
        if count == 0 || self.out.is_empty() {
            return;
        }
        let existing = self.out.chars().rev().take_while(|c| *c == '\n').count();
        for _ in existing..count {
            self.out.push('\n');
        }
    }
}

/// Trims line ends and caps consecutive newlines.
///
/// - Trailing spaces on every line are removed
/// - At most `max_consecutive_newlines` newlines survive in a row
/// - The result is trimmed
pub fn normalize_whitespace(input: &str, max_consecutive_newlines: usize) -> String {
    let mut result = String::with_capacity(input.len());
    let mut newline_count = 0;

    for line in input.split('\n') {
        let line = line.replace('\r', "");
        let line = line.trim_end();
        if !result.is_empty() || !line.is_empty() {
            if line.is_empty() {
                newline_count += 1;
            } else {
                if !result.is_empty() {
                    let breaks = (newline_count + 1).min(max_consecutive_newlines.max(1));
                    for _ in 0..breaks {
                        result.push('\n');
                    }
                }
                newline_count = 0;
                result.push_str(line);
            }
        }
    }

    result.trim().to_string()
}
