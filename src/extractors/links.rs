// src/extractors/links.rs
use crate::edgar::models::{CandidateFiling, SearchResultLink};
use crate::extractors::year::extract_year;

// Exhibit/attachment rows carry this in their href.
const EXHIBIT_MARKER: &str = "ex";

/// What a single result anchor turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClass {
    /// Attachment link; never the primary filing.
    Exhibit,
    Candidate(CandidateFiling),
    /// No fragment, or a fragment without a usable year.
    Ignored,
}

pub fn classify_link(link: &SearchResultLink) -> LinkClass {
    let href = link.href.as_str();
    if href.contains(EXHIBIT_MARKER) {
        return LinkClass::Exhibit;
    }

    let Some((_, after_hash)) = href.split_once('#') else {
        return LinkClass::Ignored;
    };

    match extract_year(href) {
        Some(year) => {
            // Only the segment up to any second '#' names the in-page anchor.
            let fragment = after_hash.split('#').next().unwrap_or_default();
            LinkClass::Candidate(CandidateFiling {
                year: year.to_string(),
                fragment: fragment.to_string(),
            })
        }
        None => LinkClass::Ignored,
    }
}
