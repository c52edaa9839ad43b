// src/pipeline/guard.rs

// Day/month fragment that shows up as a 4-digit run; never counts as a repeat.
const DATE_FRAGMENT: &str = "1231";
pub const MAX_YEARS_PER_COMPANY: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Accept,
    /// Year already processed: results have looped back.
    StopDuplicate,
    /// `MAX_YEARS_PER_COMPANY` filings already accepted.
    StopCapReached,
}

impl GuardDecision {
    pub fn is_stop(self) -> bool {
        !matches!(self, GuardDecision::Accept)
    }
}

/// Years accepted so far for one company, across all of its result pages.
#[derive(Debug, Clone, Default)]
pub struct DuplicateGuard {
    seen: Vec<String>,
}

impl DuplicateGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide on `year` and record it when accepted.
    pub fn offer(&mut self, year: &str) -> GuardDecision {
        if year != DATE_FRAGMENT && self.seen.iter().any(|y| y == year) {
            return GuardDecision::StopDuplicate;
        }
        if self.seen.len() < MAX_YEARS_PER_COMPANY {
            self.seen.push(year.to_string());
            return GuardDecision::Accept;
        }
        GuardDecision::StopCapReached
    }

    /// Accepted years in acceptance order.
    pub fn years(&self) -> &[String] {
        &self.seen
    }
}
