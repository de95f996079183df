//! enrich-snippet - page references for search snippets.
//!
//! A custom web API skill for a search indexer pipeline. PDF chunks that
//! carry a page number get a `[Page N] ` prefix so the page reference
//! survives into search results; other documents pass through unchanged.
//!
//! The transform lives in [`enrich`]; [`server`] exposes it over HTTP.

pub mod cli;
pub mod config;
pub mod enrich;
pub mod error;
pub mod server;

pub use config::Settings;
pub use enrich::{enrich, EnrichmentRecord, EnrichmentResult};
pub use error::EnrichError;
