// src/config.rs
use crate::browser::WaitStrategy;
use crate::edgar::models::CompanyEntry;
use crate::utils::AppError;
use std::path::Path;
use std::time::Duration;

// Selector polled by the `poll` wait strategy.
pub const RESULTS_TABLE_SELECTOR: &str = "div#hits table.table";

const DEFAULT_COMPANIES: [(&str, &str); 7] = [
    ("Albemarle", "ALB"),
    ("Mosaic", "MOS"),
    ("Westlake", "WLK"),
    ("PPG", "PPG"),
    ("Huntsman", "HUN"),
    ("Celanese", "CE"),
    ("Honeywell", "HON"),
];

/// Ordered, read-only list of companies to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyTable {
    entries: Vec<CompanyEntry>,
}

impl Default for CompanyTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_COMPANIES
                .iter()
                .map(|(name, ticker)| CompanyEntry::new(*name, *ticker))
                .collect(),
        }
    }
}

impl CompanyTable {
    pub fn new(entries: Vec<CompanyEntry>) -> Result<Self, AppError> {
        if entries.is_empty() {
            return Err(AppError::Config("Company table is empty".to_string()));
        }
        Ok(Self { entries })
    }

    /// Parses a JSON array of `{"name": ..., "ticker": ...}` objects.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let entries: Vec<CompanyEntry> = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid company table: {}", e)))?;
        Self::new(entries)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Keep only the named companies (case-insensitive), preserving table order.
    pub fn filtered(self, names: &[String]) -> Result<Self, AppError> {
        if names.is_empty() {
            return Ok(self);
        }
        if let Some(unknown) = names
            .iter()
            .find(|n| !self.entries.iter().any(|e| e.name.eq_ignore_ascii_case(n)))
        {
            return Err(AppError::Config(format!("Unknown company: {}", unknown)));
        }
        let entries = self
            .entries
            .into_iter()
            .filter(|e| names.iter().any(|n| e.name.eq_ignore_ascii_case(n)))
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[CompanyEntry] {
        &self.entries
    }
}

/// Fixed pauses around the result-viewer modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delays {
    pub after_anchor_click: Duration,
    pub before_modal_close: Duration,
    pub between_links: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            after_anchor_click: Duration::from_millis(300),
            before_modal_close: Duration::from_millis(100),
            between_links: Duration::from_millis(100),
        }
    }
}

impl Delays {
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            after_anchor_click: Duration::ZERO,
            before_modal_close: Duration::ZERO,
            between_links: Duration::ZERO,
        }
    }
}

/// Waits around the synthetic "commit" keystroke on each results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchWaits {
    pub before_commit: WaitStrategy,
    pub after_commit: WaitStrategy,
}

impl Default for SearchWaits {
    fn default() -> Self {
        Self {
            before_commit: WaitStrategy::settle_ms(2000),
            after_commit: WaitStrategy::settle_ms(1000),
        }
    }
}

impl SearchWaits {
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            before_commit: WaitStrategy::settle_ms(0),
            after_commit: WaitStrategy::settle_ms(0),
        }
    }

    /// Poll for the results table on both sides of the keystroke.
    pub fn polling(timeout: Duration) -> Self {
        let poll = WaitStrategy::Poll {
            selector: RESULTS_TABLE_SELECTOR.to_string(),
            interval: Duration::from_millis(100),
            timeout,
        };
        Self {
            before_commit: poll.clone(),
            after_commit: poll,
        }
    }
}

/// Settings for one pager run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    pub max_pages: u32,
    pub waits: SearchWaits,
    pub delays: Delays,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            max_pages: 3,
            waits: SearchWaits::default(),
            delays: Delays::default(),
        }
    }
}

impl PagerConfig {
    /// No waiting at all; for driving scripted pages.
    #[cfg(test)]
    pub fn immediate(max_pages: u32) -> Self {
        Self {
            max_pages,
            waits: SearchWaits::none(),
            delays: Delays::none(),
        }
    }
}
