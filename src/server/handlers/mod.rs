//! HTTP request handlers for the web server.

mod enrich;
mod health;

pub use enrich::enrich_snippet;
pub use health::{health, Health};
