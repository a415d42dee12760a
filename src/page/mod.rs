//! Saved chat pages.
//!
//! A [`Page`] is the parsed document of a chat page saved from the browser,
//! together with the address it was captured from. Adapters only ever read
//! from it; normalization works on detached copies.

pub mod dom;
pub mod text;

use std::fs;
use std::path::Path;

use kuchikikiki::{NodeData, NodeRef};
use url::Url;

use dom::{attr, parse_document, query_first};

/// Errors that can occur while loading a page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Failed to read page {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid page address '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// A parsed chat page.
pub struct Page {
    document: NodeRef,
    url: Option<Url>,
    title: String,
}

impl Page {
    /// Parse page markup.
    ///
    /// When `url` is `None` the address is recovered from the markup itself:
    /// the `saved from url` marker browsers write into saved pages, then the
    /// canonical link, then the `og:url` meta tag.
    pub fn parse(html: &str, url: Option<&str>) -> Result<Self, PageError> {
        let document = parse_document(html);

        let raw_url = match url {
            Some(url) => Some(url.to_string()),
            None => detect_source_url(&document),
        };

        let url = match raw_url {
            Some(raw) => Some(Url::parse(raw.trim()).map_err(|source| PageError::InvalidUrl {
                url: raw.clone(),
                source,
            })?),
            None => None,
        };

        let title = query_first(&document, "title")
            .map(|t| t.text_contents().trim().to_string())
            .unwrap_or_default();

        Ok(Self {
            document,
            url,
            title,
        })
    }

    /// Read and parse a saved page from disk.
    pub fn load<P: AsRef<Path>>(path: P, url: Option<&str>) -> Result<Self, PageError> {
        let path = path.as_ref();
        let html = fs::read_to_string(path).map_err(|source| PageError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&html, url)
    }

    /// The parsed document root.
    pub fn document(&self) -> &NodeRef {
        &self.document
    }

    /// Host name of the page address, empty if unknown.
    pub fn host(&self) -> &str {
        self.url
            .as_ref()
            .and_then(|u| u.host_str())
            .unwrap_or_default()
    }

    /// The page address, empty if unknown.
    pub fn url(&self) -> &str {
        self.url.as_ref().map(Url::as_str).unwrap_or_default()
    }

    /// The page's displayed title (`<title>`).
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.url())
            .field("title", &self.title)
            .finish()
    }
}

/// Marker written by browsers into pages saved with "Save page as...".
const SAVED_FROM_MARKER: &str = "saved from url=";

fn detect_source_url(document: &NodeRef) -> Option<String> {
    saved_from_url(document)
        .or_else(|| {
            query_first(document, r#"link[rel="canonical"]"#).and_then(|l| attr(&l, "href"))
        })
        .or_else(|| {
            query_first(document, r#"meta[property="og:url"]"#).and_then(|m| attr(&m, "content"))
        })
        .filter(|u| !u.trim().is_empty())
}

/// Parse `<!-- saved from url=(0042)https://... -->`.
fn saved_from_url(document: &NodeRef) -> Option<String> {
    document.descendants().find_map(|node| match node.data() {
        NodeData::Comment(comment) => {
            let comment = comment.borrow();
            let rest = comment.trim().strip_prefix(SAVED_FROM_MARKER)?;
            // Optional "(NNNN)" length prefix
            let rest = match rest.strip_prefix('(') {
                Some(after) => after.split_once(')').map(|(_, url)| url)?,
                None => rest,
            };
            let url = rest.split_whitespace().next()?;
            Some(url.to_string())
        }
        _ => None,
    })
}
