// src/browser/fake.rs
//! Scripted in-memory driver for pipeline tests.

use super::{AnchorQuery, Browser, BrowserLauncher, PageDriver};
use crate::utils::error::BrowserError;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Everything a `FakePage` was asked to do.
#[derive(Debug, Default)]
pub struct PageLog {
    pub navigations: Vec<String>,
    pub keys: Vec<String>,
    pub clicks: Vec<String>,
    pub exists_calls: usize,
    pub closed: bool,
}

#[derive(Default)]
pub struct FakePage {
    results: VecDeque<AnchorQuery>,
    // anchor selector -> href of the modal's open-file control
    modals: HashMap<String, Option<String>>,
    open_modal: Option<Option<String>>,
    delayed_selectors: HashMap<String, usize>,
    text: Option<String>,
    fail_navigation: bool,
    log: Arc<Mutex<PageLog>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the anchors returned by the next results-table query.
    pub fn with_results(mut self, result: AnchorQuery) -> Self {
        self.results.push_back(result);
        self
    }

    /// Clicking `anchor_selector` opens a modal whose open-file link is `href`
    /// (`None` models a modal rendered without the control).
    pub fn with_modal(mut self, anchor_selector: &str, href: Option<&str>) -> Self {
        self.modals
            .insert(anchor_selector.to_string(), href.map(str::to_string));
        self
    }

    /// `selector` starts matching after `misses` failed `exists` checks.
    pub fn with_selector_after(mut self, selector: &str, misses: usize) -> Self {
        self.delayed_selectors.insert(selector.to_string(), misses);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn failing_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    pub fn log(&self) -> Arc<Mutex<PageLog>> {
        Arc::clone(&self.log)
    }

    pub fn exists_calls(&self) -> usize {
        self.log.lock().unwrap().exists_calls
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.log.lock().unwrap().navigations.push(url.to_string());
        if self.fail_navigation {
            return Err(BrowserError::Script(format!("navigation to {} failed", url)));
        }
        Ok(())
    }

    async fn press_key(&mut self, key: &str) -> Result<(), BrowserError> {
        self.log.lock().unwrap().keys.push(key.to_string());
        Ok(())
    }

    async fn exists(&mut self, selector: &str) -> Result<bool, BrowserError> {
        self.log.lock().unwrap().exists_calls += 1;
        match self.delayed_selectors.get_mut(selector) {
            Some(0) => Ok(true),
            Some(misses) => {
                *misses -= 1;
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn query_table_anchors(&mut self, _table_selector: &str) -> Result<AnchorQuery, BrowserError> {
        Ok(self.results.pop_front().unwrap_or(AnchorQuery::TableMissing))
    }

    async fn click(&mut self, selector: &str) -> Result<(), BrowserError> {
        self.log.lock().unwrap().clicks.push(selector.to_string());
        if selector == "button#close-modal" {
            return match self.open_modal.take() {
                Some(_) => Ok(()),
                None => Err(BrowserError::ElementNotFound(selector.to_string())),
            };
        }
        match self.modals.get(selector) {
            Some(href) => {
                self.open_modal = Some(href.clone());
                Ok(())
            }
            None => Err(BrowserError::ElementNotFound(selector.to_string())),
        }
    }

    async fn read_attribute(&mut self, selector: &str, attribute: &str) -> Result<Option<String>, BrowserError> {
        match (&self.open_modal, selector, attribute) {
            (Some(Some(href)), "a#open-file", "href") => Ok(Some(href.clone())),
            _ => Err(BrowserError::ElementNotFound(selector.to_string())),
        }
    }

    async fn page_text(&mut self) -> Result<String, BrowserError> {
        self.text
            .clone()
            .ok_or_else(|| BrowserError::ElementNotFound("body".to_string()))
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        self.log.lock().unwrap().closed = true;
        Ok(())
    }
}

/// Hands out scripted pages in order, then fails.
#[derive(Default)]
pub struct FakeBrowser {
    pages: VecDeque<FakePage>,
    closed: Arc<AtomicUsize>,
}

impl FakeBrowser {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages: pages.into(),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn with_close_counter(pages: Vec<FakePage>, closed: Arc<AtomicUsize>) -> Self {
        Self {
            pages: pages.into(),
            closed,
        }
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn new_page(&mut self) -> Result<Box<dyn PageDriver>, BrowserError> {
        match self.pages.pop_front() {
            Some(page) => Ok(Box::new(page)),
            None => Err(BrowserError::Launch("no scripted page left".to_string())),
        }
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Each launch yields a browser with a single scripted page.
#[derive(Default)]
pub struct FakeLauncher {
    pages: Mutex<VecDeque<FakePage>>,
    launched: AtomicUsize,
    closed: Arc<AtomicUsize>,
}

impl FakeLauncher {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn Browser>, BrowserError> {
        let page = self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BrowserError::Launch("no scripted browser left".to_string()))?;
        self.launched.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeBrowser::with_close_counter(
            vec![page],
            Arc::clone(&self.closed),
        )))
    }
}
