// src/browser/wait.rs
use super::PageDriver;
use crate::utils::error::BrowserError;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// How to wait for asynchronous page rendering to settle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitStrategy {
    /// Fixed delay.
    Settle(Duration),
    /// Poll until `selector` matches or `timeout` elapses.
    Poll {
        selector: String,
        interval: Duration,
        timeout: Duration,
    },
}

impl WaitStrategy {
    pub fn settle_ms(ms: u64) -> Self {
        WaitStrategy::Settle(Duration::from_millis(ms))
    }

    /// Wait on `page`. A poll that runs out of time returns `WaitTimeout`.
    pub async fn wait(&self, page: &mut dyn PageDriver) -> Result<(), BrowserError> {
        match self {
            WaitStrategy::Settle(delay) => {
                pause(*delay).await;
                Ok(())
            }
            WaitStrategy::Poll {
                selector,
                interval,
                timeout,
            } => {
                let deadline = Instant::now() + *timeout;
                loop {
                    if page.exists(selector).await? {
                        return Ok(());
                    }
                    if Instant::now() >= deadline {
                        return Err(BrowserError::WaitTimeout {
                            selector: selector.clone(),
                            timeout_ms: timeout.as_millis() as u64,
                        });
                    }
                    sleep(*interval).await;
                }
            }
        }
    }
}

/// Sleep unless the delay is zero.
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakePage;

    #[tokio::test]
    async fn test_poll_returns_once_selector_appears() {
        let mut page = FakePage::new().with_selector_after("div#hits table.table", 2);
        let strategy = WaitStrategy::Poll {
            selector: "div#hits table.table".to_string(),
            interval: Duration::from_millis(1),
            timeout: Duration::from_secs(5),
        };
        tokio_test::assert_ok!(strategy.wait(&mut page).await);
        assert_eq!(page.exists_calls(), 3);
    }

    #[tokio::test]
    async fn test_poll_times_out_when_selector_never_appears() {
        let mut page = FakePage::new();
        let strategy = WaitStrategy::Poll {
            selector: "div#hits".to_string(),
            interval: Duration::from_millis(1),
            timeout: Duration::from_millis(5),
        };
        let err = strategy.wait(&mut page).await.unwrap_err();
        assert!(matches!(err, BrowserError::WaitTimeout { timeout_ms: 5, .. }));
    }

    #[tokio::test]
    async fn test_zero_settle_does_not_touch_page() {
        let mut page = FakePage::new();
        tokio_test::assert_ok!(WaitStrategy::settle_ms(0).wait(&mut page).await);
        assert_eq!(page.exists_calls(), 0);
    }
}
