//! Coordinate normalization for raw registry rows.
//!
//! The registry publishes WGS84 coordinates as text. Each row is converted
//! with [`parse_coordinate`]; rows where either coordinate fails are dropped,
//! never patched. Survivors keep their input order.

use std::ops::RangeInclusive;

use serde_json::Value;

use crate::model::{
    BUSINESS_NAME_FIELD, CATEGORY_FIELD, LATITUDE_FIELD, LONGITUDE_FIELD, MerchantRecord, ROAD_ADDRESS_FIELD, RawRow,
};

/// Valid WGS84 latitudes.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid WGS84 longitudes.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Why a coordinate field could not be converted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("{field} is missing")]
    Missing { field: &'static str },

    #[error("{field} is not numeric: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field} is not finite")]
    NotFinite { field: &'static str },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Convert one coordinate field to a finite number within `range`.
///
/// Accepts numeric text (surrounding whitespace ignored) or a JSON number, so
/// rows that were already normalized convert to the same value.
pub fn parse_coordinate(
    value: Option<&Value>, field: &'static str, range: &RangeInclusive<f64>,
) -> Result<f64, CoordinateError> {
    let number = match value {
        None | Some(Value::Null) => return Err(CoordinateError::Missing { field }),
        Some(Value::Number(n)) => n.as_f64().ok_or(CoordinateError::NotFinite { field })?,
        Some(Value::String(s)) => {
            let text = s.trim();
            if text.is_empty() {
                return Err(CoordinateError::Missing { field });
            }
            text.parse::<f64>()
                .map_err(|_| CoordinateError::NotNumeric { field, value: s.clone() })?
        }
        Some(other) => return Err(CoordinateError::NotNumeric { field, value: other.to_string() }),
    };

    if !number.is_finite() {
        return Err(CoordinateError::NotFinite { field });
    }
    if !range.contains(&number) {
        return Err(CoordinateError::OutOfRange { field, value: number });
    }

    Ok(number)
}

/// Normalize one raw row into a [`MerchantRecord`].
pub fn normalize_row(mut row: RawRow) -> Result<MerchantRecord, CoordinateError> {
    let latitude = parse_coordinate(row.get(LATITUDE_FIELD), LATITUDE_FIELD, &LATITUDE_RANGE)?;
    let longitude = parse_coordinate(row.get(LONGITUDE_FIELD), LONGITUDE_FIELD, &LONGITUDE_RANGE)?;
    row.remove(LATITUDE_FIELD);
    row.remove(LONGITUDE_FIELD);

    let business_name = take_text(&mut row, BUSINESS_NAME_FIELD);
    let category = take_text(&mut row, CATEGORY_FIELD);
    let road_address = take_text(&mut row, ROAD_ADDRESS_FIELD);

    Ok(MerchantRecord { business_name, category, road_address, latitude, longitude, extra: row })
}

/// Normalize a batch of rows, dropping those without usable coordinates.
pub fn normalize(rows: Vec<RawRow>) -> Vec<MerchantRecord> {
    let total = rows.len();
    let records: Vec<MerchantRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match normalize_row(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(row = idx, "dropping row: {}", e);
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::debug!(kept = records.len(), dropped = total - records.len(), "normalized merchant rows");
    }

    records
}

/// Move a text column out of the row. Null becomes `None`; values of any other
/// type stay in the row untouched.
fn take_text(row: &mut RawRow, field: &str) -> Option<String> {
    match row.remove(field) {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => {
            row.insert(field.to_string(), other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_parse_coordinate_text() {
        let value = json!("37.5");
        assert_eq!(parse_coordinate(Some(&value), LATITUDE_FIELD, &LATITUDE_RANGE), Ok(37.5));

        let value = json!("  127.0 ");
        assert_eq!(parse_coordinate(Some(&value), LONGITUDE_FIELD, &LONGITUDE_RANGE), Ok(127.0));
    }

    #[test]
    fn test_parse_coordinate_number() {
        let value = json!(37.5);
        assert_eq!(parse_coordinate(Some(&value), LATITUDE_FIELD, &LATITUDE_RANGE), Ok(37.5));
    }

    #[test]
    fn test_parse_coordinate_missing() {
        let result = parse_coordinate(None, LATITUDE_FIELD, &LATITUDE_RANGE);
        assert!(matches!(result, Err(CoordinateError::Missing { .. })));

        let null = Value::Null;
        let result = parse_coordinate(Some(&null), LATITUDE_FIELD, &LATITUDE_RANGE);
        assert!(matches!(result, Err(CoordinateError::Missing { .. })));

        let blank = json!("   ");
        let result = parse_coordinate(Some(&blank), LATITUDE_FIELD, &LATITUDE_RANGE);
        assert!(matches!(result, Err(CoordinateError::Missing { .. })));
    }

    #[test]
    fn test_parse_coordinate_not_numeric() {
        let value = json!("abc");
        let result = parse_coordinate(Some(&value), LATITUDE_FIELD, &LATITUDE_RANGE);
        assert!(matches!(result, Err(CoordinateError::NotNumeric { value, .. }) if value == "abc"));

        let value = json!(true);
        let result = parse_coordinate(Some(&value), LATITUDE_FIELD, &LATITUDE_RANGE);
        assert!(matches!(result, Err(CoordinateError::NotNumeric { .. })));
    }

    #[test]
    fn test_parse_coordinate_not_finite() {
        for text in ["NaN", "inf", "-infinity"] {
            let value = json!(text);
            let result = parse_coordinate(Some(&value), LATITUDE_FIELD, &LATITUDE_RANGE);
            assert!(matches!(result, Err(CoordinateError::NotFinite { .. })), "{text} should not be finite");
        }
    }

    #[test]
    fn test_parse_coordinate_out_of_range() {
        let value = json!("127.0");
        let result = parse_coordinate(Some(&value), LATITUDE_FIELD, &LATITUDE_RANGE);
        assert!(matches!(result, Err(CoordinateError::OutOfRange { value, .. }) if value == 127.0));
    }

    #[test]
    fn test_normalize_drops_invalid_latitude() {
        let rows = vec![row(json!({"REFINE_WGS84_LAT": "abc", "REFINE_WGS84_LOGT": "1.0", "CMPNM_NM": "A"}))];
        assert!(normalize(rows).is_empty());
    }

    #[test]
    fn test_normalize_drops_missing_longitude() {
        let rows = vec![row(json!({"REFINE_WGS84_LAT": "37.5", "CMPNM_NM": "A"}))];
        assert!(normalize(rows).is_empty());
    }

    #[test]
    fn test_normalize_converts_and_preserves_fields() {
        let rows = vec![row(json!({
            "REFINE_WGS84_LAT": "37.5",
            "REFINE_WGS84_LOGT": "127.0",
            "CMPNM_NM": "A",
            "INDUTYPE_NM": "음식점",
            "REFINE_ROADNM_ADDR": "경기도 수원시 장안구 정자천로 1",
            "SIGUN_NM": "수원시",
            "TELNO": null
        }))];

        let records = normalize(rows);
        assert_eq!(records.len(), 1);

        let rec = &records[0];
        assert_eq!(rec.latitude, 37.5);
        assert_eq!(rec.longitude, 127.0);
        assert_eq!(rec.business_name.as_deref(), Some("A"));
        assert_eq!(rec.category.as_deref(), Some("음식점"));
        assert_eq!(rec.road_address.as_deref(), Some("경기도 수원시 장안구 정자천로 1"));
        assert_eq!(rec.extra["SIGUN_NM"], "수원시");
        assert_eq!(rec.extra["TELNO"], Value::Null);
        assert!(!rec.extra.contains_key(LATITUDE_FIELD));
    }

    #[test]
    fn test_normalize_preserves_order() {
        let rows = vec![
            row(json!({"REFINE_WGS84_LAT": "37.1", "REFINE_WGS84_LOGT": "127.1", "CMPNM_NM": "first"})),
            row(json!({"REFINE_WGS84_LAT": "", "REFINE_WGS84_LOGT": "127.2", "CMPNM_NM": "dropped"})),
            row(json!({"REFINE_WGS84_LAT": "37.3", "REFINE_WGS84_LOGT": "127.3", "CMPNM_NM": "second"})),
            row(json!({"REFINE_WGS84_LAT": "37.4", "REFINE_WGS84_LOGT": "127.4", "CMPNM_NM": "third"})),
        ];

        let names: Vec<_> = normalize(rows).into_iter().filter_map(|r| r.business_name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_normalize_is_identity_on_normalized_rows() {
        let rows = vec![
            row(json!({"REFINE_WGS84_LAT": "37.2635", "REFINE_WGS84_LOGT": "127.0286", "CMPNM_NM": "A", "INDUTYPE_NM": "음식점"})),
            row(json!({"REFINE_WGS84_LAT": "37.3", "REFINE_WGS84_LOGT": "127.3", "CMPNM_NM": null, "ZIP_CD": "16489"})),
        ];

        let once = normalize(rows);
        let twice = normalize(once.clone().into_iter().map(MerchantRecord::into_raw_row).collect());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_text_name_stays_in_extra() {
        let rows = vec![row(json!({"REFINE_WGS84_LAT": "37.3", "REFINE_WGS84_LOGT": "127.3", "CMPNM_NM": 42}))];
        let records = normalize(rows);
        assert_eq!(records[0].business_name, None);
        assert_eq!(records[0].extra[BUSINESS_NAME_FIELD], 42);
    }
}
