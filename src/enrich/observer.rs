//! Observability hooks for the enrichment pipeline.
//!
//! The transform never depends on what an observer does; observers exist so
//! request logging can be swapped out (or silenced) without touching the
//! enrichment logic.

use super::types::{EnrichmentResult, FieldIssue, RecordId};
use crate::error::EnrichError;

/// Number of leading characters of a snippet included in per-record logs.
pub const LOG_PREFIX_CHARS: usize = 15;

/// Receives events as a batch moves through the pipeline.
///
/// All methods default to doing nothing.
pub trait EnrichObserver: Send + Sync {
    /// A batch envelope was decoded.
    fn batch_received(&self, _count: usize) {}

    /// A field on one record was ignored because of its JSON type.
    fn field_ignored(&self, _record_id: &RecordId, _issue: &FieldIssue) {}

    /// A single record was enriched.
    fn record_enriched(&self, _result: &EnrichmentResult) {}

    /// All records of a batch were enriched.
    fn batch_completed(&self, _count: usize) {}

    /// The request could not be decoded as a batch.
    fn request_rejected(&self, _error: &EnrichError) {}
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EnrichObserver for NoopObserver {}

/// Observer that writes events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EnrichObserver for TracingObserver {
    fn batch_received(&self, count: usize) {
        tracing::info!("Received {} records", count);
    }

    fn field_ignored(&self, record_id: &RecordId, issue: &FieldIssue) {
        tracing::warn!(
            "rid={} ignoring {}: expected {}, found {}",
            record_id,
            issue.field,
            issue.expected,
            issue.found
        );
    }

    fn record_enriched(&self, result: &EnrichmentResult) {
        tracing::info!(
            "rid={} prefix={}",
            result.record_id,
            snippet_prefix(result.enriched_snippet())
        );
    }

    fn batch_completed(&self, count: usize) {
        tracing::info!("Returning {} results", count);
    }

    fn request_rejected(&self, error: &EnrichError) {
        tracing::error!("Invalid JSON body received: {}", error);
    }
}

/// First [`LOG_PREFIX_CHARS`] characters of `snippet`.
pub fn snippet_prefix(snippet: &str) -> &str {
    match snippet.char_indices().nth(LOG_PREFIX_CHARS) {
        Some((idx, _)) => &snippet[..idx],
        None => snippet,
    }
}
