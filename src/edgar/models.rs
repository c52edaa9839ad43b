// src/edgar/models.rs
use serde::{Deserialize, Serialize};

/// A company to search for: the display name used in the query and output
/// folder, plus the ticker passed as the entity filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEntry {
    pub name: String,
    pub ticker: String,
}

impl CompanyEntry {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
        }
    }
}

/// One anchor scraped from the search results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultLink {
    pub href: String,
    #[serde(default)]
    pub text: String,
}

/// A result row that looks like a primary filing: a year parsed from its
/// href and the fragment used to re-locate the anchor in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFiling {
    pub year: String,
    pub fragment: String,
}

impl CandidateFiling {
    /// Selector for the in-page anchor that opens this filing's viewer.
    pub fn anchor_selector(&self) -> String {
        format!("a[href=\"#{}\"]", self.fragment)
    }
}

/// How a fetched body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Already-rendered text, e.g. a browser's `body.textContent`.
    PlainText,
    /// Raw archive bytes that still carry markup.
    Html,
}

/// Document text fetched from the external filing URL.
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    pub url: String,
    pub raw_text: String,
    pub kind: DocumentKind,
}
