//! merchant_query tool implementation.
//!
//! Looks up local-currency merchants for one jurisdiction through the shared
//! [`QueryPipeline`], applies the optional category filter, and returns the
//! merchants together with their map points and the category list.

use localpay_client::{MerchantSource, QueryPipeline};
use localpay_core::{
    CategoryFilter, Diagnostic, Error, Jurisdiction, MapPoint, MerchantRecord, QueryStatus,
};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for merchant_query tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MerchantQueryParams {
    /// City or county, either the Korean name ("수원시") or its romanized slug ("suwon").
    pub jurisdiction: String,

    /// Category to keep (e.g. "음식점"). Omit or pass "전체" for all categories.
    #[serde(default)]
    pub category: Option<String>,

    /// Drop the cached result for this jurisdiction and fetch again.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Output structure for merchant_query tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MerchantQueryOutput {
    pub jurisdiction: Jurisdiction,
    /// Category filter that was applied ("전체" for all).
    pub category: String,
    pub status: QueryStatus,
    /// Merchant count before category filtering.
    pub total: usize,
    /// Distinct categories in the unfiltered result, sorted.
    pub categories: Vec<String>,
    /// Merchants after category filtering, in registry order.
    pub merchants: Vec<MerchantRecord>,
    /// One point per merchant in `merchants`.
    pub map: Vec<MapPoint>,
    /// Errors and advisories (no data, empty category).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    pub debug: DebugInfo,
}

/// Debug information.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DebugInfo {
    /// Whether the result came from the in-memory cache.
    pub cache_hit: bool,
}

/// Implementation of the merchant_query tool.
///
/// Fetch failures are reported as a tool error result carrying the diagnostic,
/// not as a protocol error. An unknown jurisdiction is a protocol error.
pub async fn query_impl<S: MerchantSource>(
    pipeline: &QueryPipeline<S>, params: MerchantQueryParams,
) -> Result<CallToolResult, McpError> {
    let jurisdiction: Jurisdiction = params.jurisdiction.parse()?;
    let filter = CategoryFilter::from_option(params.category.as_deref());

    let outcome =
        if params.force_refresh { pipeline.refresh(jurisdiction).await } else { pipeline.query(jurisdiction).await };

    let selection = outcome.result.select(&filter);
    let diagnostics: Vec<Diagnostic> = outcome.diagnostic.iter().cloned().chain(selection.advisory).collect();

    tracing::info!(
        jurisdiction = %jurisdiction,
        category = %filter,
        total = outcome.result.len(),
        shown = selection.records.len(),
        cache_hit = outcome.cache_hit,
        "merchant_query"
    );

    let output = MerchantQueryOutput {
        jurisdiction,
        category: filter.to_string(),
        status: outcome.result.status,
        total: outcome.result.len(),
        categories: outcome.result.categories().into_iter().map(str::to_string).collect(),
        map: selection.records.iter().map(|r| r.map_point()).collect(),
        merchants: selection.records.into_iter().cloned().collect(),
        diagnostics,
        debug: DebugInfo { cache_hit: outcome.cache_hit },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize merchants: {e}")))?;

    if outcome.is_error() {
        Ok(CallToolResult::error(vec![Content::text(json)]))
    } else {
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use localpay_client::{FetchOutcome, RegistryClient, RegistryConfig, RegistryError};
    use localpay_core::{DiagnosticKind, RawRow};
    use serde_json::json;

    /// Source that always returns the same three Suwon merchants.
    struct FixedSource;

    fn row(value: serde_json::Value) -> RawRow {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[async_trait]
    impl MerchantSource for FixedSource {
        async fn fetch(&self, _jurisdiction: Jurisdiction) -> Result<FetchOutcome, RegistryError> {
            Ok(FetchOutcome::Rows(vec![
                row(json!({"CMPNM_NM": "행궁분식", "INDUTYPE_NM": "음식점", "REFINE_WGS84_LAT": "37.2826", "REFINE_WGS84_LOGT": "127.0147"})),
                row(json!({"CMPNM_NM": "매탄서점", "INDUTYPE_NM": "서적", "REFINE_WGS84_LAT": "37.2649", "REFINE_WGS84_LOGT": "127.0476"})),
                row(json!({"CMPNM_NM": "좌표없음", "INDUTYPE_NM": "서적", "REFINE_WGS84_LAT": null, "REFINE_WGS84_LOGT": "127.0"})),
            ]))
        }
    }

    fn output_of(result: &CallToolResult) -> MerchantQueryOutput {
        let text = &result.content[0].as_text().unwrap().text;
        serde_json::from_str(text).unwrap()
    }

    fn params(jurisdiction: &str, category: Option<&str>) -> MerchantQueryParams {
        MerchantQueryParams {
            jurisdiction: jurisdiction.into(),
            category: category.map(str::to_string),
            force_refresh: false,
        }
    }

    #[tokio::test]
    async fn test_query_all_categories() {
        let pipeline = QueryPipeline::new(FixedSource);
        let result = query_impl(&pipeline, params("수원시", None)).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let output = output_of(&result);
        assert_eq!(output.jurisdiction, Jurisdiction::Suwon);
        assert_eq!(output.category, "전체");
        assert_eq!(output.total, 2);
        assert_eq!(output.merchants.len(), 2);
        assert_eq!(output.map.len(), 2);
        assert_eq!(output.categories, vec!["서적", "음식점"]);
        assert!(output.diagnostics.is_empty());
        assert!(!output.debug.cache_hit);
    }

    #[tokio::test]
    async fn test_query_with_category_and_slug() {
        let pipeline = QueryPipeline::new(FixedSource);
        let result = query_impl(&pipeline, params("suwon", Some("서적"))).await.unwrap();

        let output = output_of(&result);
        assert_eq!(output.total, 2);
        assert_eq!(output.merchants.len(), 1);
        assert_eq!(output.merchants[0].business_name.as_deref(), Some("매탄서점"));
        assert_eq!(output.map[0].lat, 37.2649);
    }

    #[tokio::test]
    async fn test_empty_category_is_advisory() {
        let pipeline = QueryPipeline::new(FixedSource);
        let result = query_impl(&pipeline, params("수원시", Some("숙박"))).await.unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let output = output_of(&result);
        assert!(output.merchants.is_empty());
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].kind, DiagnosticKind::EmptyCategory);
    }

    #[tokio::test]
    async fn test_second_call_reports_cache_hit() {
        let pipeline = QueryPipeline::new(FixedSource);
        query_impl(&pipeline, params("수원시", None)).await.unwrap();

        let result = query_impl(&pipeline, params("수원시", None)).await.unwrap();
        assert!(output_of(&result).debug.cache_hit);

        let refreshed = query_impl(&pipeline, MerchantQueryParams { force_refresh: true, ..params("수원시", None) })
            .await
            .unwrap();
        assert!(!output_of(&refreshed).debug.cache_hit);
    }

    #[tokio::test]
    async fn test_unknown_jurisdiction_is_invalid_params() {
        let pipeline = QueryPipeline::new(FixedSource);
        let err = query_impl(&pipeline, params("서울시", None)).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[tokio::test]
    async fn test_missing_key_is_tool_error() {
        let client = RegistryClient::new(RegistryConfig::default()).unwrap();
        let pipeline = QueryPipeline::new(client);

        let result = query_impl(&pipeline, params("고양시", None)).await.unwrap();
        assert!(result.is_error.unwrap_or(false));

        let output = output_of(&result);
        assert_eq!(output.status, QueryStatus::Failed);
        assert!(output.merchants.is_empty());
        assert_eq!(output.diagnostics[0].kind, DiagnosticKind::Configuration);
    }
}
