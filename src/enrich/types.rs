//! Request and response types for the enrichment skill.
//!
//! Input records are decoded field by field from loosely-typed JSON so that a
//! bad field on one record falls back to its default instead of rejecting the
//! whole batch. Output types serialize to the shape the search indexer expects.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::observer::EnrichObserver;

/// Record id used when the caller omits `recordId`.
pub const DEFAULT_RECORD_ID: &str = "0";

/// Opaque record identifier, echoed back exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Value);

impl RecordId {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self(Value::String(DEFAULT_RECORD_ID.to_string()))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// Page indicator as supplied by the caller.
///
/// Numbers keep their JSON source text and strings are kept verbatim, so
/// `3`, `"3"` and `"iv"` render as `3`, `3` and `iv`, and integers wider
/// than 64 bits are not rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageIndicator {
    Number(Number),
    Text(String),
}

impl fmt::Display for PageIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageIndicator::Number(n) => write!(f, "{}", n),
            PageIndicator::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PageIndicator {
    fn from(n: i64) -> Self {
        PageIndicator::Number(n.into())
    }
}

impl From<&str> for PageIndicator {
    fn from(s: &str) -> Self {
        PageIndicator::Text(s.to_string())
    }
}

/// A field that was present but had a JSON type it cannot carry.
///
/// The field is treated as absent for that record only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub expected: &'static str,
    pub found: &'static str,
}

/// Nested location hints (`data.locationMetadata`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationMetadata {
    pub page_number_from: Option<PageIndicator>,
}

/// Payload of a single input record (`values[].data`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordData {
    /// Snippet text; `None` is rendered as the empty string.
    pub content: Option<String>,
    pub page_number: Option<PageIndicator>,
    pub location_metadata: Option<LocationMetadata>,
}

impl RecordData {
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// One input record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentRecord {
    pub record_id: RecordId,
    pub data: RecordData,
}

impl EnrichmentRecord {
    pub fn new(record_id: impl Into<Value>, data: RecordData) -> Self {
        Self {
            record_id: RecordId::new(record_id),
            data,
        }
    }

    /// Decode a record from JSON, reporting ignored fields to `observer`.
    ///
    /// Never fails: anything that does not fit falls back to its default.
    pub fn from_json(value: &Value, observer: &dyn EnrichObserver) -> Self {
        let Some(obj) = value.as_object() else {
            let record = Self::default();
            observer.field_ignored(
                &record.record_id,
                &FieldIssue {
                    field: "values[]",
                    expected: "object",
                    found: json_type(value),
                },
            );
            return record;
        };

        let record_id = match obj.get("recordId") {
            None | Some(Value::Null) => RecordId::default(),
            Some(id) => RecordId(id.clone()),
        };

        let mut issues = Vec::new();
        let data = match obj.get("data") {
            None | Some(Value::Null) => RecordData::default(),
            Some(Value::Object(data)) => decode_data(data, &mut issues),
            Some(other) => {
                issues.push(FieldIssue {
                    field: "data",
                    expected: "object",
                    found: json_type(other),
                });
                RecordData::default()
            }
        };

        for issue in &issues {
            observer.field_ignored(&record_id, issue);
        }

        Self { record_id, data }
    }
}

fn decode_data(data: &Map<String, Value>, issues: &mut Vec<FieldIssue>) -> RecordData {
    let content = match data.get("content") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(FieldIssue {
                field: "content",
                expected: "string",
                found: json_type(other),
            });
            None
        }
    };

    let page_number = decode_page(data.get("pageNumber"), "pageNumber", issues);

    let location_metadata = match data.get("locationMetadata") {
        None | Some(Value::Null) => None,
        Some(Value::Object(loc)) => Some(LocationMetadata {
            page_number_from: decode_page(
                loc.get("pageNumberFrom"),
                "locationMetadata.pageNumberFrom",
                issues,
            ),
        }),
        Some(other) => {
            issues.push(FieldIssue {
                field: "locationMetadata",
                expected: "object",
                found: json_type(other),
            });
            None
        }
    };

    RecordData {
        content,
        page_number,
        location_metadata,
    }
}

fn decode_page(
    value: Option<&Value>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<PageIndicator> {
    match value? {
        Value::Null => None,
        Value::Number(n) => Some(PageIndicator::Number(n.clone())),
        Value::String(s) => Some(PageIndicator::Text(s.clone())),
        other => {
            issues.push(FieldIssue {
                field,
                expected: "number or string",
                found: json_type(other),
            });
            None
        }
    }
}

/// Name of a JSON value's type, for diagnostics.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A diagnostic entry in an `errors` or `warnings` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Output payload of a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedData {
    pub enriched_snippet: String,
}

/// One output record.
///
/// `errors` and `warnings` are part of the skill contract and always
/// serialize as `null` on the success path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    #[serde(rename = "recordId")]
    pub record_id: RecordId,
    pub data: EnrichedData,
    pub errors: Option<Vec<ApiMessage>>,
    pub warnings: Option<Vec<ApiMessage>>,
}

impl EnrichmentResult {
    pub fn enriched_snippet(&self) -> &str {
        &self.data.enriched_snippet
    }
}

/// Response envelope for `POST /api/enrich_snippet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResponse {
    pub values: Vec<EnrichmentResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiMessage>>,
}

impl EnrichmentResponse {
    pub fn ok(values: Vec<EnrichmentResult>) -> Self {
        Self {
            values,
            errors: None,
        }
    }

    /// Envelope for a request that could not be processed at all.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            values: Vec::new(),
            errors: Some(vec![ApiMessage {
                message: message.into(),
            }]),
        }
    }
}
