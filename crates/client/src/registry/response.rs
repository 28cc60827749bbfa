//! Merchant registry response envelope parsing.
//!
//! A populated response looks like:
//!
//! ```json
//! {"RegionMnyFacltStus": [
//!     {"head": [{"list_total_count": 2}, {"RESULT": {"CODE": "INFO-000", "MESSAGE": "..."}}]},
//!     {"row": [{"CMPNM_NM": "...", "REFINE_WGS84_LAT": "37.28", ...}]}
//! ]}
//! ```
//!
//! When nothing matches, the dataset section is absent and only a status
//! object is returned: `{"RESULT": {"CODE": "INFO-200", "MESSAGE": "..."}}`.

use localpay_core::RawRow;
use serde_json::{Map, Value};

use super::RegistryError;

/// Status code the registry uses for "no matching data".
pub const NO_DATA_CODE: &str = "INFO-200";

/// Result of a successful registry call.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Raw rows in registry order. Never empty.
    Rows(Vec<RawRow>),
    /// Valid response with no rows for the jurisdiction.
    NoData,
}

/// Validate the envelope and pull out the raw rows.
///
/// # Errors
///
/// - [`RegistryError::Schema`] when the body is not the expected shape; the
///   raw body is carried along for display.
/// - [`RegistryError::Api`] when the registry reports an error code instead of data.
pub fn parse_envelope(dataset: &str, body: &str) -> Result<FetchOutcome, RegistryError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| RegistryError::schema(format!("body is not JSON: {e}"), body))?;

    let Value::Object(mut top) = value else {
        return Err(RegistryError::schema("top level is not an object", body));
    };

    let Some(sections) = top.remove(dataset) else {
        return status_only(dataset, &top, body);
    };

    let Value::Array(mut sections) = sections else {
        return Err(RegistryError::schema(format!("'{dataset}' is not an array"), body));
    };

    match sections.len() {
        0 => return Err(RegistryError::schema(format!("'{dataset}' has no head section"), body)),
        1 => return Ok(FetchOutcome::NoData),
        _ => {}
    }

    let total = list_total_count(&sections[0]);

    let Value::Object(mut data) = sections.swap_remove(1) else {
        return Err(RegistryError::schema(format!("'{dataset}' data section is not an object"), body));
    };

    let rows = match data.remove("row") {
        None | Some(Value::Null) => return Ok(FetchOutcome::NoData),
        Some(Value::Array(rows)) => rows,
        Some(_) => return Err(RegistryError::schema("'row' is not an array", body)),
    };

    if rows.is_empty() {
        return Ok(FetchOutcome::NoData);
    }

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| match row {
            Value::Object(map) => Ok(map),
            _ => Err(RegistryError::schema(format!("row {idx} is not an object"), body)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(total) = total
        && (rows.len() as u64) < total
    {
        tracing::warn!(returned = rows.len(), total, "registry listing truncated to a single page");
    }

    Ok(FetchOutcome::Rows(rows))
}

/// Handle a body that has no dataset section, only (maybe) a status object.
fn status_only(dataset: &str, top: &Map<String, Value>, body: &str) -> Result<FetchOutcome, RegistryError> {
    let Some(Value::Object(result)) = top.get("RESULT") else {
        return Err(RegistryError::schema(format!("missing '{dataset}' section"), body));
    };

    let code = result.get("CODE").and_then(Value::as_str).unwrap_or_default();
    let message = result.get("MESSAGE").and_then(Value::as_str).unwrap_or_default();

    if code == NO_DATA_CODE {
        return Ok(FetchOutcome::NoData);
    }
    if code.is_empty() {
        return Err(RegistryError::schema("RESULT has no CODE", body));
    }

    tracing::warn!(code, message, "merchant registry rejected the request");
    Err(RegistryError::Api { code: code.to_string(), message: message.to_string() })
}

/// Read `list_total_count` from the head section, if present.
fn list_total_count(head: &Value) -> Option<u64> {
    head.get("head")?
        .as_array()?
        .iter()
        .find_map(|item| item.get("list_total_count")?.as_u64())
}
