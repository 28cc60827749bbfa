//! MCP server handler implementation.
//!
//! Routes tool calls to the merchant lookup tools.
use std::sync::Arc;

use crate::tools::list_jurisdictions::{ListJurisdictionsParams, list_impl};
use crate::tools::merchant_query::{MerchantQueryParams, query_impl};

use localpay_client::QueryPipeline;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for localpay-mcp.
#[derive(Clone)]
pub struct LocalpayServer {
    pipeline: Arc<QueryPipeline>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LocalpayServer {
    /// Create a new server handler around a shared query pipeline.
    pub fn new(pipeline: Arc<QueryPipeline>) -> Self {
        Self { pipeline, tool_router: Self::tool_router() }
    }

    /// Look up local-currency merchants for one Gyeonggi-do city or county.
    ///
    /// Results are cached per jurisdiction for the configured TTL (one hour by default).
    #[tool(
        description = "Find merchants that accept Gyeonggi local currency in one city or county. Optional category filter ('전체' for all). Returns merchants, map points, and the category list."
    )]
    async fn merchant_query(&self, params: Parameters<MerchantQueryParams>) -> Result<CallToolResult, McpError> {
        query_impl(self.pipeline.as_ref(), params.0).await
    }

    /// List the 31 supported jurisdictions.
    #[tool(description = "List the Gyeonggi-do cities and counties accepted by merchant_query.")]
    async fn list_jurisdictions(&self, params: Parameters<ListJurisdictionsParams>) -> Result<CallToolResult, McpError> {
        list_impl(params.0)
    }
}

impl ServerHandler for LocalpayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "localpay-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Gyeonggi local-currency merchant lookup. Call list_jurisdictions for valid names, then merchant_query."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
