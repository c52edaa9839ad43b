// src/browser/mod.rs
//! Browser driver abstraction.
//!
//! The pipeline only talks to these traits; `chromium` provides the real
//! implementation and tests drive a scripted fake.

pub mod chromium;
pub mod wait;

#[cfg(test)]
pub mod fake;

use crate::edgar::models::SearchResultLink;
use crate::utils::error::BrowserError;
use async_trait::async_trait;

pub use chromium::ChromiumLauncher;
pub use wait::WaitStrategy;

/// Outcome of collecting anchors from a results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorQuery {
    Found(Vec<SearchResultLink>),
    TableMissing,
    BodyMissing,
}

impl AnchorQuery {
    /// Links on the page; a missing table or body yields none.
    pub fn into_links(self) -> Vec<SearchResultLink> {
        match self {
            AnchorQuery::Found(links) => links,
            AnchorQuery::TableMissing | AnchorQuery::BodyMissing => Vec::new(),
        }
    }
}

/// Starts independent browser instances.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn Browser>, BrowserError>;
}

/// A running browser instance.
#[async_trait]
pub trait Browser: Send {
    /// Open a new tab.
    async fn new_page(&mut self) -> Result<Box<dyn PageDriver>, BrowserError>;
    /// Shut the instance down.
    async fn close(self: Box<Self>) -> Result<(), BrowserError>;
}

/// A single tab.
#[async_trait]
pub trait PageDriver: Send {
    /// Navigate and wait for the load event.
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;
    /// Press a key against the focused element (the page body if nothing has focus).
    async fn press_key(&mut self, key: &str) -> Result<(), BrowserError>;
    /// Whether `selector` currently matches anything.
    async fn exists(&mut self, selector: &str) -> Result<bool, BrowserError>;
    /// Collect `{href, text}` for every anchor in the body of the table matched by `table_selector`.
    async fn query_table_anchors(&mut self, table_selector: &str) -> Result<AnchorQuery, BrowserError>;
    async fn click(&mut self, selector: &str) -> Result<(), BrowserError>;
    /// Raw attribute value as written in the markup, `None` if the attribute is absent.
    async fn read_attribute(&mut self, selector: &str, attribute: &str) -> Result<Option<String>, BrowserError>;
    /// `document.body.textContent`.
    async fn page_text(&mut self) -> Result<String, BrowserError>;
    async fn close(self: Box<Self>) -> Result<(), BrowserError>;
}
