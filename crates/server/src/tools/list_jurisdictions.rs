//! list_jurisdictions tool implementation.

use localpay_core::{Error, Jurisdiction};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the list_jurisdictions tool (none).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListJurisdictionsParams {}

/// One selectable city or county.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JurisdictionEntry {
    /// Official Korean name, as sent to the registry (e.g. "수원시").
    pub name: String,
    /// Romanized alias accepted by merchant_query (e.g. "suwon").
    pub slug: String,
}

/// Output from the list_jurisdictions tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListJurisdictionsOutput {
    pub jurisdictions: Vec<JurisdictionEntry>,
}

pub fn list_impl(_params: ListJurisdictionsParams) -> Result<CallToolResult, McpError> {
    let jurisdictions = Jurisdiction::ALL
        .iter()
        .map(|j| JurisdictionEntry { name: j.name().to_string(), slug: j.slug().to_string() })
        .collect();

    let json = serde_json::to_string_pretty(&ListJurisdictionsOutput { jurisdictions })
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize jurisdictions: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_all_in_order() {
        let result = list_impl(ListJurisdictionsParams {}).unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let text = &result.content[0].as_text().unwrap().text;
        let output: ListJurisdictionsOutput = serde_json::from_str(text).unwrap();

        assert_eq!(output.jurisdictions.len(), 31);
        assert_eq!(output.jurisdictions[0].name, "가평군");
        assert_eq!(output.jurisdictions[30].name, "화성시");
        assert!(output.jurisdictions.iter().any(|j| j.name == "수원시" && j.slug == "suwon"));
    }
}
