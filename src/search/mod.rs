//! Search orchestration module
//!
//! Validates queries, fans out to the entity sources, and merges their
//! matches into one ranked and truncated page.

mod executor;
mod models;

pub use executor::SearchEngine;
pub use models::*;
