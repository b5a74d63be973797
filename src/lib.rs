//! Brewery catalog dashboard: loading, filtering and summarising breweries.
//!
//! The GUI binary lives in `main.rs`; everything here is free of rendering
//! so it can be tested headless.

pub mod config;
pub mod data;
pub mod state;
