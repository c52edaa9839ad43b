// src/edgar/mod.rs
pub mod client;
pub mod models;
pub mod query;
