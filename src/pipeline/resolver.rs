// src/pipeline/resolver.rs
use crate::browser::wait::pause;
use crate::browser::PageDriver;
use crate::config::Delays;
use crate::edgar::models::CandidateFiling;
use crate::utils::error::BrowserError;

const OPEN_FILE_SELECTOR: &str = "a#open-file";
const CLOSE_MODAL_SELECTOR: &str = "button#close-modal";

/// Opens a result row's viewer modal to learn the real document URL.
pub struct DocumentResolver<'a> {
    delays: &'a Delays,
}

impl<'a> DocumentResolver<'a> {
    pub fn new(delays: &'a Delays) -> Self {
        Self { delays }
    }

    /// Click the candidate's anchor and read the modal's open-file link.
    /// The modal stays open; call `dismiss` once the document is handled.
    pub async fn open(&self, page: &mut dyn PageDriver, candidate: &CandidateFiling) -> Result<String, BrowserError> {
        page.click(&candidate.anchor_selector()).await?;
        pause(self.delays.after_anchor_click).await;

        let href = page
            .read_attribute(OPEN_FILE_SELECTOR, "href")
            .await?
            .ok_or_else(|| BrowserError::AttributeMissing {
                selector: OPEN_FILE_SELECTOR.to_string(),
                attribute: "href".to_string(),
            })?;

        tracing::info!("The actual link is: {}", href);
        Ok(href)
    }

    pub async fn dismiss(&self, page: &mut dyn PageDriver) -> Result<(), BrowserError> {
        pause(self.delays.before_modal_close).await;
        page.click(CLOSE_MODAL_SELECTOR).await
    }
}
