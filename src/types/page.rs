//! Wire types for the IMIS IQA result envelope and record flattening.
//!
//! IMIS serializes rows as lists of `{Name, Value}` pairs wrapped in
//! `$values` arrays, with structured values carrying a `$value` member.
//! That convention is a serialization quirk of the upstream system and is
//! absorbed entirely inside this module; the rest of the crate only sees
//! plain [`Record`] mappings.

use serde::Deserialize;
use serde_json::Value;

use crate::Error;

/// One flattened result row: field name to scalar value.
///
/// Field names are whatever the IQA definition selects; they are not
/// known ahead of time.
pub type Record = serde_json::Map<String, Value>;

/// A decoded page of IQA results.
#[derive(Debug)]
pub struct Page {
    /// Flattened rows, in arrival order.
    pub records: Vec<Record>,
    /// Whether the server reports more pages after this one.
    pub has_next: bool,
    /// Total rows matching the query, across all pages.
    pub total_count: i64,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "HasNext", default)]
    has_next: bool,
    #[serde(rename = "TotalCount", default)]
    total_count: i64,
    #[serde(rename = "Items", default)]
    items: ValueList<Row>,
}

/// The vendor's `{"$values": [...]}` array wrapper.
#[derive(Debug, Deserialize)]
struct ValueList<T> {
    #[serde(rename = "$values", default)]
    values: Vec<T>,
}

impl<T> Default for ValueList<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Row {
    #[serde(rename = "Properties", default)]
    properties: ValueList<Property>,
}

#[derive(Debug, Default, Deserialize)]
struct Property {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value", default)]
    value: Value,
}

impl Page {
    /// Decodes one raw response body, collapsing the `$values` wrappers
    /// into flattened records.
    pub fn from_body(body: &str) -> Result<Page, Error> {
        let envelope = serde_json::from_str::<Envelope>(body).map_err(|e| {
            tracing::error!("Error processing response: {}", e);
            Error::DecodeFailed
        })?;
        Ok(Page {
            records: envelope
                .items
                .values
                .into_iter()
                .map(flatten_row)
                .collect(),
            has_next: envelope.has_next,
            total_count: envelope.total_count,
        })
    }
}

fn flatten_row(row: Row) -> Record {
    let mut record = Record::new();
    for property in row.properties.values {
        let value = match property.value {
            // Structured values carry the scalar in `$value`; keep the
            // whole object when that member is absent.
            Value::Object(mut object) => object
                .remove("$value")
                .unwrap_or(Value::Object(object)),
            other => other,
        };
        record.insert(property.name, value);
    }
    record
}
