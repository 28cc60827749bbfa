//! Merchant registry request parameters.

use localpay_core::Jurisdiction;
use serde::Serialize;

/// Dataset name of the local-currency merchant listing.
pub const DATASET: &str = "RegionMnyFacltStus";

/// Rows requested in the single page we fetch. Large enough for the biggest
/// jurisdiction's listing in one request.
pub const PAGE_SIZE: u32 = 1000;

/// Query string for one registry request.
///
/// Field names follow the Gyeonggi open-data API:
/// https://data.gg.go.kr/portal/data/service/selectServicePage.do?infId=3NPA52LBMO36CQEQ1GMY28894927
#[derive(Debug, Clone, Serialize)]
pub struct RegistryRequest<'a> {
    /// Personal API key.
    #[serde(rename = "KEY")]
    pub key: &'a str,

    /// Response format, always `json`.
    #[serde(rename = "Type")]
    pub response_type: &'static str,

    /// 1-based page index, always 1.
    #[serde(rename = "pIndex")]
    pub page_index: u32,

    /// Rows per page.
    #[serde(rename = "pSize")]
    pub page_size: u32,

    /// Korean jurisdiction name.
    #[serde(rename = "SIGUN_NM")]
    pub jurisdiction: &'static str,
}

impl<'a> RegistryRequest<'a> {
    pub fn new(key: &'a str, jurisdiction: Jurisdiction) -> Self {
        Self { key, response_type: "json", page_index: 1, page_size: PAGE_SIZE, jurisdiction: jurisdiction.name() }
    }
}
