// src/pipeline/runner.rs
use crate::browser::Browser;
use crate::config::CompanyTable;
use crate::pipeline::pager::{CompanyReport, SearchPager};

/// Outcome of a full run over the company table.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub companies: Vec<CompanyReport>,
}

impl RunReport {
    pub fn files_written(&self) -> usize {
        self.companies.iter().map(|c| c.written.len()).sum()
    }

    pub fn failed_companies(&self) -> Vec<&str> {
        self.companies
            .iter()
            .filter(|c| c.error.is_some())
            .map(|c| c.company.as_str())
            .collect()
    }

    pub fn all_failed(&self) -> bool {
        !self.companies.is_empty() && self.companies.iter().all(|c| c.error.is_some())
    }
}

/// Processes every company in table order, one tab each, on a shared browser.
pub struct CompanyRunLoop<'a> {
    pager: SearchPager<'a>,
}

impl<'a> CompanyRunLoop<'a> {
    pub fn new(pager: SearchPager<'a>) -> Self {
        Self { pager }
    }

    /// A company's failure is logged and recorded; the loop always moves on.
    pub async fn run(&self, browser: &mut dyn Browser, companies: &CompanyTable) -> RunReport {
        let mut run = RunReport::default();

        for company in companies.entries() {
            tracing::info!("Processing company: {} ({})", company.name, company.ticker);
            let mut report = CompanyReport::new(&company.name);

            match browser.new_page().await {
                Ok(mut page) => {
                    if let Err(e) = self.pager.run(page.as_mut(), company, &mut report).await {
                        tracing::error!("Error processing {}: {}", company.name, e);
                        report.error = Some(e.to_string());
                    }
                    if let Err(e) = page.close().await {
                        tracing::debug!("Failed to close search tab for {}: {}", company.name, e);
                    }
                }
                Err(e) => {
                    tracing::error!("Could not open a tab for {}: {}", company.name, e);
                    report.error = Some(e.to_string());
                }
            }

            tracing::info!(
                "{}: {} pages, {} accepted, {} written, {} unchanged, {} without fiscal year, {} failed",
                report.company,
                report.pages_visited,
                report.accepted_years.len(),
                report.written.len(),
                report.unchanged,
                report.not_found,
                report.failed
            );
            if let Some(stop) = report.last_stop {
                tracing::debug!("{}: last page cut short ({:?})", report.company, stop);
            }
            run.companies.push(report);
        }

        run
    }
}
