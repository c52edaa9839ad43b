// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("DevTools protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError), // Automatically convert chromiumoxide errors

    #[error("Element not found for selector: {0}")]
    ElementNotFound(String),

    #[error("Attribute '{attribute}' missing on element '{selector}'")]
    AttributeMissing { selector: String, attribute: String },

    #[error("Unexpected page script result: {0}")]
    Script(String),

    #[error("Timed out after {timeout_ms}ms waiting for '{selector}'")]
    WaitTimeout { selector: String, timeout_ms: u64 },
}

#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 500 Internal Server Error

    #[error("SEC Rate limit likely exceeded")]
    RateLimited,

    #[error("Could not find specified filing: {0}")]
    FilingDocNotFound(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Browser automation failed: {0}")]
    Browser(#[from] BrowserError),

    #[error("EDGAR interaction failed: {0}")]
    Edgar(#[from] EdgarError), // Automatically convert Edgar errors

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
