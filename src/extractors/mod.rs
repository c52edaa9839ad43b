// src/extractors/mod.rs
pub mod fiscal;
pub mod links;
pub mod text;
pub mod year;

// Re-export key extraction functions for convenience
pub use fiscal::resolve_fiscal_year;
pub use links::{classify_link, LinkClass};
pub use text::normalize_document_text;
