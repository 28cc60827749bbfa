//! Merchant records as returned by the `RegionMnyFacltStus` dataset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw row from the registry envelope, untouched.
pub type RawRow = Map<String, Value>;

/// Business name column.
pub const BUSINESS_NAME_FIELD: &str = "CMPNM_NM";
/// Industry / category column.
pub const CATEGORY_FIELD: &str = "INDUTYPE_NM";
/// Refined road-name address column.
pub const ROAD_ADDRESS_FIELD: &str = "REFINE_ROADNM_ADDR";
/// WGS84 latitude column (text in the raw feed).
pub const LATITUDE_FIELD: &str = "REFINE_WGS84_LAT";
/// WGS84 longitude column (text in the raw feed).
pub const LONGITUDE_FIELD: &str = "REFINE_WGS84_LOGT";

/// A merchant that accepts Gyeonggi local currency.
///
/// Only built by [`normalize_row`](crate::normalize_row), so `latitude` and
/// `longitude` are always finite and within WGS84 bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MerchantRecord {
    pub business_name: Option<String>,
    pub category: Option<String>,
    pub road_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Every other column of the raw row, keyed by its original name.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: RawRow,
}

/// A latitude/longitude pair for map plotting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
}

impl MerchantRecord {
    pub fn map_point(&self) -> MapPoint {
        MapPoint { lat: self.latitude, lon: self.longitude }
    }

    /// Convert back into a raw row with the registry's column names.
    ///
    /// Coordinates are written as JSON numbers, so normalizing the result
    /// yields an identical record.
    pub fn into_raw_row(self) -> RawRow {
        let mut row = self.extra;
        if let Some(name) = self.business_name {
            row.insert(BUSINESS_NAME_FIELD.into(), Value::String(name));
        }
        if let Some(category) = self.category {
            row.insert(CATEGORY_FIELD.into(), Value::String(category));
        }
        if let Some(address) = self.road_address {
            row.insert(ROAD_ADDRESS_FIELD.into(), Value::String(address));
        }
        row.insert(LATITUDE_FIELD.into(), Value::from(self.latitude));
        row.insert(LONGITUDE_FIELD.into(), Value::from(self.longitude));
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MerchantRecord {
        let mut extra = RawRow::new();
        extra.insert("SIGUN_NM".into(), Value::String("수원시".into()));
        MerchantRecord {
            business_name: Some("행궁분식".into()),
            category: Some("음식점".into()),
            road_address: None,
            latitude: 37.2826,
            longitude: 127.0147,
            extra,
        }
    }

    #[test]
    fn test_into_raw_row_uses_registry_columns() {
        let row = record().into_raw_row();
        assert_eq!(row[BUSINESS_NAME_FIELD], "행궁분식");
        assert_eq!(row[CATEGORY_FIELD], "음식점");
        assert_eq!(row["SIGUN_NM"], "수원시");
        assert_eq!(row[LATITUDE_FIELD].as_f64(), Some(37.2826));
        assert_eq!(row[LONGITUDE_FIELD].as_f64(), Some(127.0147));
        assert!(!row.contains_key(ROAD_ADDRESS_FIELD));
    }

    #[test]
    fn test_map_point() {
        let point = record().map_point();
        assert_eq!(point, MapPoint { lat: 37.2826, lon: 127.0147 });
    }

    #[test]
    fn test_serialize_skips_empty_extra() {
        let mut rec = record();
        rec.extra.clear();
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("extra").is_none());
        assert_eq!(json["business_name"], "행궁분식");
    }
}
