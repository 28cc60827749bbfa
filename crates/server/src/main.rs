//! localpay-mcp server entry point.
//!
//! Boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use localpay_client::QueryPipeline;
use localpay_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    if config.require_api_key().is_err() {
        tracing::warn!("LOCALPAY_API_KEY is not set; merchant queries will report a configuration error");
    }

    let pipeline = QueryPipeline::from_config(&config)?;

    tracing::info!(base_url = %config.base_url, cache_ttl_secs = config.cache_ttl_secs, "Starting localpay-mcp server on stdio transport");

    let handler = handler::LocalpayServer::new(Arc::new(pipeline));
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
