// src/edgar/query.rs
use crate::edgar::models::CompanyEntry;

const FULL_TEXT_SEARCH_URL: &str = "https://www.sec.gov/edgar/search/#/q=";
// The search UI only returns the expected rows for this exact parameter set.
const SEARCH_START_DATE: &str = "2011-12-31";
const SEARCH_END_DATE: &str = "2021-12-31";
const SEARCH_CATEGORY: &str = "form-cat1";
const SEARCH_FORMS: &str = "10-K";

/// Filtered full-text search for one company's annual reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    base_url: String,
}

impl SearchQuery {
    pub fn for_company(company: &CompanyEntry) -> Self {
        let base_url = format!(
            "{}{}&dateRange=custom&category={}&entityName={}&startdt={}&enddt={}&filter_forms={}",
            FULL_TEXT_SEARCH_URL,
            company.name,
            SEARCH_CATEGORY,
            company.ticker.to_uppercase(),
            SEARCH_START_DATE,
            SEARCH_END_DATE,
            SEARCH_FORMS,
        );
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for a 1-based result page. Always built from the base query,
    /// so page parameters never pile up across iterations.
    pub fn page_url(&self, page_num: u32) -> String {
        format!("{}&page={}", self.base_url, page_num)
    }
}
