// src/browser/chromium.rs
//! Chromium-backed driver using chromiumoxide.

use super::{AnchorQuery, Browser, BrowserLauncher, PageDriver};
use crate::edgar::models::SearchResultLink;
use crate::utils::error::BrowserError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Find a Chromium binary: explicit path, then `CHROME_PATH`, then `PATH`.
/// `None` leaves detection to chromiumoxide.
pub fn find_chromium(explicit: Option<&PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.clone());
    }

    if let Ok(p) = std::env::var("CHROME_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    ["google-chrome", "chromium", "chromium-browser"]
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// Launches headless (or headed) Chromium instances.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    headed: bool,
    executable: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn new(headed: bool, chrome_path: Option<PathBuf>) -> Self {
        Self {
            headed,
            executable: find_chromium(chrome_path.as_ref()),
        }
    }

    fn config(&self) -> Result<BrowserConfig, BrowserError> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if self.headed {
            builder = builder.with_head();
        }
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(BrowserError::Launch)
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn Browser>, BrowserError> {
        let config = self.config()?;
        let (browser, mut handler) = CdpBrowser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("CDP handler event error: {}", e);
                }
            }
        });

        tracing::debug!("Launched Chromium (headed: {})", self.headed);
        Ok(Box::new(ChromiumBrowser {
            browser,
            handler_task,
        }))
    }
}

pub struct ChromiumBrowser {
    browser: CdpBrowser,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl Browser for ChromiumBrowser {
    async fn new_page(&mut self) -> Result<Box<dyn PageDriver>, BrowserError> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(Box::new(ChromiumPage { page }))
    }

    async fn close(mut self: Box<Self>) -> Result<(), BrowserError> {
        let closed = self.browser.close().await;
        // The process may already be gone; reap it either way.
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        closed?;
        Ok(())
    }
}

pub struct ChromiumPage {
    page: Page,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum TableScriptResult {
    Found { links: Vec<SearchResultLink> },
    TableMissing,
    BodyMissing,
}

#[derive(Debug, Deserialize)]
struct AttributeScriptResult {
    found: bool,
    value: Option<String>,
}

/// Quote a value as a JS string literal.
fn js_string(value: &str) -> Result<String, BrowserError> {
    serde_json::to_string(value).map_err(|e| BrowserError::Script(e.to_string()))
}

impl ChromiumPage {
    async fn eval<T: serde::de::DeserializeOwned>(&self, script: String) -> Result<T, BrowserError> {
        let result = self.page.evaluate(script).await?;
        result
            .into_value::<T>()
            .map_err(|e| BrowserError::Script(e.to_string()))
    }
}

#[async_trait]
impl PageDriver for ChromiumPage {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn press_key(&mut self, key: &str) -> Result<(), BrowserError> {
        let target = if self.exists(":focus").await? { ":focus" } else { "body" };
        self.page.find_element(target).await?.press_key(key).await?;
        Ok(())
    }

    async fn exists(&mut self, selector: &str) -> Result<bool, BrowserError> {
        let script = format!("document.querySelector({}) !== null", js_string(selector)?);
        self.eval(script).await
    }

    async fn query_table_anchors(&mut self, table_selector: &str) -> Result<AnchorQuery, BrowserError> {
        let script = format!(
            r#"(() => {{
                const table = document.querySelector({});
                if (!table) return {{ status: "table_missing" }};
                const tbody = table.querySelector("tbody");
                if (!tbody) return {{ status: "body_missing" }};
                const links = Array.from(tbody.querySelectorAll("a")).map((a) => ({{
                    href: a.href,
                    text: a.textContent || "",
                }}));
                return {{ status: "found", links }};
            }})()"#,
            js_string(table_selector)?
        );
        let result: TableScriptResult = self.eval(script).await?;
        Ok(match result {
            TableScriptResult::Found { links } => AnchorQuery::Found(links),
            TableScriptResult::TableMissing => AnchorQuery::TableMissing,
            TableScriptResult::BodyMissing => AnchorQuery::BodyMissing,
        })
    }

    async fn click(&mut self, selector: &str) -> Result<(), BrowserError> {
        if !self.exists(selector).await? {
            return Err(BrowserError::ElementNotFound(selector.to_string()));
        }
        self.page.find_element(selector).await?.click().await?;
        Ok(())
    }

    async fn read_attribute(&mut self, selector: &str, attribute: &str) -> Result<Option<String>, BrowserError> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({});
                if (!el) return {{ found: false, value: null }};
                return {{ found: true, value: el.getAttribute({}) }};
            }})()"#,
            js_string(selector)?,
            js_string(attribute)?
        );
        let result: AttributeScriptResult = self.eval(script).await?;
        if !result.found {
            return Err(BrowserError::ElementNotFound(selector.to_string()));
        }
        Ok(result.value)
    }

    async fn page_text(&mut self) -> Result<String, BrowserError> {
        let text: Option<String> = self
            .eval("document.body ? document.body.textContent : null".to_string())
            .await?;
        text.ok_or_else(|| BrowserError::ElementNotFound("body".to_string()))
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        self.page.close().await?;
        Ok(())
    }
}
