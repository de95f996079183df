//! Snippet enrichment.
//!
//! Prepends a `[Page N] ` reference to each snippet whose record carries a
//! page indicator. Records come from a search indexer skillset in batches;
//! each record is transformed independently and the output batch mirrors the
//! input batch one-to-one.
//!
//! Page resolution order (first match wins):
//! 1. `data.pageNumber`
//! 2. `data.locationMetadata.pageNumberFrom`
//!
//! Records with neither (DOCX and other formats without reliable page
//! information) pass through unchanged.

mod observer;
mod types;

pub use observer::{snippet_prefix, EnrichObserver, NoopObserver, TracingObserver};
pub use types::{
    ApiMessage, EnrichedData, EnrichmentRecord, EnrichmentResponse, EnrichmentResult, FieldIssue,
    LocationMetadata, PageIndicator, RecordData, RecordId, DEFAULT_RECORD_ID,
};

use serde_json::Value;

use crate::error::EnrichError;

/// Decode a request body into a batch of records.
///
/// The envelope must be a JSON object. A missing or null `values` key is an
/// empty batch; any other non-array `values` rejects the request.
pub fn parse_batch(
    body: &[u8],
    observer: &dyn EnrichObserver,
) -> Result<Vec<EnrichmentRecord>, EnrichError> {
    let envelope: Value = serde_json::from_slice(body)?;

    let envelope = match envelope {
        Value::Object(map) => map,
        other => return Err(EnrichError::NotAnObject(types::json_type(&other))),
    };

    match envelope.get("values") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(values)) => Ok(values
            .iter()
            .map(|value| EnrichmentRecord::from_json(value, observer))
            .collect()),
        Some(other) => Err(EnrichError::ValuesNotArray(types::json_type(other))),
    }
}

/// Enrich every record of a batch, preserving order.
pub fn enrich(batch: Vec<EnrichmentRecord>, observer: &dyn EnrichObserver) -> Vec<EnrichmentResult> {
    observer.batch_received(batch.len());

    let results: Vec<_> = batch
        .into_iter()
        .map(|record| {
            let result = enrich_record(record);
            observer.record_enriched(&result);
            result
        })
        .collect();

    observer.batch_completed(results.len());
    results
}

/// Enrich a single record.
pub fn enrich_record(record: EnrichmentRecord) -> EnrichmentResult {
    let enriched_snippet = annotate(record.data.content(), resolve_page(&record.data));

    EnrichmentResult {
        record_id: record.record_id,
        data: EnrichedData { enriched_snippet },
        errors: None,
        warnings: None,
    }
}

/// Pick the page indicator for a record, if any.
pub fn resolve_page(data: &RecordData) -> Option<&PageIndicator> {
    data.page_number.as_ref().or_else(|| {
        data.location_metadata
            .as_ref()
            .and_then(|loc| loc.page_number_from.as_ref())
    })
}

/// Render the enriched snippet text.
pub fn annotate(content: &str, page: Option<&PageIndicator>) -> String {
    match page {
        Some(page) => format!("[Page {}] {}", page, content),
        None => content.to_string(),
    }
}

/// Decode, enrich and wrap a raw request body in one step.
pub fn enrich_body(
    body: &[u8],
    observer: &dyn EnrichObserver,
) -> Result<EnrichmentResponse, EnrichError> {
    let batch = parse_batch(body, observer).inspect_err(|e| observer.request_rejected(e))?;
    Ok(EnrichmentResponse::ok(enrich(batch, observer)))
}
