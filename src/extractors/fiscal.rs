// src/extractors/fiscal.rs
use once_cell::sync::Lazy;
use regex::Regex;

// Most specific phrasing first.
const FISCAL_YEAR_KEYWORDS: [&str; 2] = ["fiscal year ended", "fiscal year"];

static FOUR_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}").expect("Failed to compile FOUR_DIGITS_RE"));

/// Finds the fiscal year a document reports on.
///
/// `text` is expected to be normalized (lowercase). For each keyword in turn,
/// locate its first occurrence and take the first 4-digit run anywhere after
/// it; the first keyword that yields one wins. No calendar validation.
pub fn resolve_fiscal_year(text: &str) -> Option<&str> {
    FISCAL_YEAR_KEYWORDS.iter().find_map(|keyword| {
        let start = text.find(keyword)? + keyword.len();
        FOUR_DIGITS_RE.find(&text[start..]).map(|m| m.as_str())
    })
}
