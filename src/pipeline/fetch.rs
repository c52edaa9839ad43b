// src/pipeline/fetch.rs
use crate::browser::{Browser, BrowserLauncher};
use crate::edgar::client::EdgarClient;
use crate::edgar::models::{DocumentKind, ResolvedDocument};
use crate::utils::error::BrowserError;
use crate::utils::AppError;
use async_trait::async_trait;
use std::sync::Arc;

/// Retrieves the raw text behind a resolved document URL.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ResolvedDocument, AppError>;
}

/// Reads the document in a browser instance of its own, separate from the
/// search tab. The instance is closed whether or not the read succeeded.
pub struct BrowserFetcher {
    launcher: Arc<dyn BrowserLauncher>,
}

impl BrowserFetcher {
    pub fn new(launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl DocumentFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<ResolvedDocument, AppError> {
        let mut browser = self.launcher.launch().await?;
        let read = read_body_text(browser.as_mut(), url).await;

        if let Err(e) = browser.close().await {
            tracing::warn!("Failed to close document browser: {}", e);
        }

        let raw_text = read?;
        Ok(ResolvedDocument {
            url: url.to_string(),
            raw_text,
            kind: DocumentKind::PlainText,
        })
    }
}

async fn read_body_text(browser: &mut dyn Browser, url: &str) -> Result<String, BrowserError> {
    let mut page = browser.new_page().await?;
    let text = match page.navigate(url).await {
        Ok(()) => page.page_text().await,
        Err(e) => Err(e),
    };
    if let Err(e) = page.close().await {
        tracing::debug!("Failed to close document tab: {}", e);
    }
    text
}

/// Downloads the document directly from the archive.
pub struct HttpFetcher {
    client: EdgarClient,
}

impl HttpFetcher {
    pub fn new(client: EdgarClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<ResolvedDocument, AppError> {
        let raw_text = self.client.download_filing_doc(url).await?;
        Ok(ResolvedDocument {
            url: url.to_string(),
            raw_text,
            kind: DocumentKind::Html,
        })
    }
}
