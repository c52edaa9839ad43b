// src/pipeline/mod.rs
pub mod fetch;
pub mod guard;
pub mod pager;
pub mod resolver;
pub mod runner;

pub use fetch::{BrowserFetcher, DocumentFetcher, HttpFetcher};
pub use pager::SearchPager;
pub use runner::CompanyRunLoop;
