// src/pipeline/pager.rs
use crate::browser::wait::pause;
use crate::browser::{AnchorQuery, PageDriver, WaitStrategy};
use crate::config::{PagerConfig, RESULTS_TABLE_SELECTOR};
use crate::edgar::models::{CandidateFiling, CompanyEntry, SearchResultLink};
use crate::edgar::query::SearchQuery;
use crate::extractors::{classify_link, normalize_document_text, resolve_fiscal_year, LinkClass};
use crate::pipeline::fetch::DocumentFetcher;
use crate::pipeline::guard::{DuplicateGuard, GuardDecision};
use crate::pipeline::resolver::DocumentResolver;
use crate::storage::{FilingText, StorageManager, WriteOutcome};
use crate::utils::error::BrowserError;
use crate::utils::AppError;
use std::path::PathBuf;

// Synthetic keystroke that makes the search UI apply the URL's filters.
const COMMIT_KEY: &str = "Enter";

/// Counters for one company's run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyReport {
    pub company: String,
    pub pages_visited: u32,
    /// Years accepted by the duplicate guard, in order.
    pub accepted_years: Vec<String>,
    pub written: Vec<PathBuf>,
    pub unchanged: usize,
    pub not_found: usize,
    /// Filings whose fetch or write failed.
    pub failed: usize,
    /// Why the most recent page was cut short, if it was.
    pub last_stop: Option<GuardDecision>,
    /// Error that ended this company's run early.
    pub error: Option<String>,
}

impl CompanyReport {
    pub fn new(company: &str) -> Self {
        Self {
            company: company.to_string(),
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written(path) => self.written.push(path),
            WriteOutcome::Unchanged(_) => self.unchanged += 1,
            WriteOutcome::NotFound => self.not_found += 1,
        }
    }
}

/// Walks one company's search result pages and saves every accepted filing.
pub struct SearchPager<'a> {
    config: &'a PagerConfig,
    fetcher: &'a dyn DocumentFetcher,
    storage: &'a StorageManager,
}

impl<'a> SearchPager<'a> {
    pub fn new(config: &'a PagerConfig, fetcher: &'a dyn DocumentFetcher, storage: &'a StorageManager) -> Self {
        Self {
            config,
            fetcher,
            storage,
        }
    }

    /// Process pages `1..=max_pages` for `company` on `page`.
    ///
    /// Per-filing fetch/write failures are counted in `report` and skipped.
    /// Anything else (navigation, modal handling) aborts the company.
    pub async fn run(&self, page: &mut dyn PageDriver, company: &CompanyEntry, report: &mut CompanyReport) -> Result<(), AppError> {
        let query = SearchQuery::for_company(company);
        tracing::debug!("Search query for {}: {}", company.name, query.base_url());
        // One guard for all pages: result pages can repeat rows.
        let mut guard = DuplicateGuard::new();

        let outcome = self.walk_pages(page, company, &query, &mut guard, report).await;
        report.accepted_years = guard.years().to_vec();
        outcome
    }

    async fn walk_pages(
        &self,
        page: &mut dyn PageDriver,
        company: &CompanyEntry,
        query: &SearchQuery,
        guard: &mut DuplicateGuard,
        report: &mut CompanyReport,
    ) -> Result<(), AppError> {
        for page_num in 1..=self.config.max_pages {
            let links = self.load_results(page, query, page_num).await?;
            report.pages_visited += 1;
            tracing::debug!("{} page {}: {} links", company.name, page_num, links.len());

            for link in &links {
                match classify_link(link) {
                    LinkClass::Exhibit => tracing::info!("Skipping exhibit link: {} ({})", link.href, link.text.trim()),
                    LinkClass::Ignored => tracing::trace!("Ignoring result link: {}", link.href),
                    LinkClass::Candidate(candidate) => {
                        let decision = guard.offer(&candidate.year);
                        if decision.is_stop() {
                            match decision {
                                GuardDecision::StopDuplicate => tracing::info!(
                                    "Year {} already processed for {}, stopping page {} at #{}",
                                    candidate.year, company.name, page_num, candidate.fragment
                                ),
                                _ => tracing::info!(
                                    "Reached {} filings for {}, stopping page {}",
                                    guard.years().len(), company.name, page_num
                                ),
                            }
                            report.last_stop = Some(decision);
                            break;
                        }
                        self.process_candidate(page, company, &candidate, report).await?;
                    }
                }
                pause(self.config.delays.between_links).await;
            }
        }
        Ok(())
    }

    /// Navigate to a result page, nudge the search UI, and collect its anchors.
    async fn load_results(&self, page: &mut dyn PageDriver, query: &SearchQuery, page_num: u32) -> Result<Vec<SearchResultLink>, AppError> {
        let url = query.page_url(page_num);
        tracing::info!("Loading results page {}: {}", page_num, url);
        page.navigate(&url).await?;

        settle(&self.config.waits.before_commit, page).await?;
        page.press_key(COMMIT_KEY).await?;
        settle(&self.config.waits.after_commit, page).await?;

        let links = match page.query_table_anchors(RESULTS_TABLE_SELECTOR).await? {
            AnchorQuery::Found(links) => links,
            missing => {
                tracing::warn!("No results on page {}: {:?}", page_num, missing);
                missing.into_links()
            }
        };
        Ok(links)
    }

    async fn process_candidate(
        &self,
        page: &mut dyn PageDriver,
        company: &CompanyEntry,
        candidate: &CandidateFiling,
        report: &mut CompanyReport,
    ) -> Result<(), AppError> {
        let resolver = DocumentResolver::new(&self.config.delays);
        let url = resolver.open(page, candidate).await?;

        match self.save_document(company, &candidate.year, &url).await {
            Ok(outcome) => report.record(outcome),
            Err(e) => {
                tracing::error!("Error scraping and saving text from {}: {}", url, e);
                report.failed += 1;
            }
        }

        resolver.dismiss(page).await?;
        Ok(())
    }

    async fn save_document(&self, company: &CompanyEntry, expected_year: &str, url: &str) -> Result<WriteOutcome, AppError> {
        let document = self.fetcher.fetch(url).await?;
        let text = normalize_document_text(&document.raw_text, document.kind);
        let resolved = resolve_fiscal_year(&text);
        tracing::debug!("{} {}: resolved fiscal year {:?}", company.name, expected_year, resolved);

        let filing = FilingText {
            company,
            expected_year,
            source_url: &document.url,
            text: &text,
        };
        Ok(self.storage.write_resolved(filing, resolved)?)
    }
}

/// Run a wait; a poll that times out is only a warning since the table query reports what is missing.
async fn settle(strategy: &WaitStrategy, page: &mut dyn PageDriver) -> Result<(), BrowserError> {
    match strategy.wait(page).await {
        Err(BrowserError::WaitTimeout { selector, timeout_ms }) => {
            tracing::warn!("'{}' did not appear within {}ms", selector, timeout_ms);
            Ok(())
        }
        other => other,
    }
}
