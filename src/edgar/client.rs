// src/edgar/client.rs
use crate::utils::error::EdgarError;
use reqwest::header;

// SEC rejects anonymous clients; override with --user-agent.
pub const DEFAULT_USER_AGENT: &str = "sec-filing-scraper research contact@example.com";

/// Thin reqwest wrapper for pulling filing documents straight from the archive.
#[derive(Debug, Clone)]
pub struct EdgarClient {
    client: reqwest::Client,
    user_agent: String,
}

impl EdgarClient {
    /// Creates a reqwest client configured for EDGAR interaction.
    pub fn new(user_agent: &str) -> Result<Self, EdgarError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent) // Set the required User-Agent
            .build()?;
        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }

    /// Downloads a specific filing document from its URL.
    pub async fn download_filing_doc(&self, url: &str) -> Result<String, EdgarError> {
        tracing::info!("Downloading document from: {}", url);
        tracing::debug!("Using User-Agent: {}", self.user_agent);

        let response = self
            .client
            .get(url)
            // SEC uses various content types, but often text/html for filings
            .header(header::ACCEPT, "application/xml,text/html,text/plain,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::FORBIDDEN {
                tracing::warn!("Received 403 Forbidden - check User-Agent and request pace.");
                return Err(EdgarError::RateLimited);
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(EdgarError::FilingDocNotFound(url.to_string()));
            }
            return Err(EdgarError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

        Ok(body)
    }
}


/// One-shot local HTTP server for exercising the client without the network.
#[cfg(test)]
pub(crate) mod test_server {
    use super::EdgarClient;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves a single canned response on a local port and returns a document URL on it.
    pub async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/Archives/edgar/data/doc.htm", addr)
    }

    /// Client that never routes the loopback requests through an env proxy.
    pub fn local_client() -> EdgarClient {
        let user_agent = "test-agent test@example.com";
        EdgarClient {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .no_proxy()
                .build()
                .unwrap(),
            user_agent: user_agent.to_string(),
        }
    }
}
