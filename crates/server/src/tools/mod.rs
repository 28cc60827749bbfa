//! MCP tool implementations.
//!
//! This module contains all tools exposed by the localpay-mcp server.

pub mod list_jurisdictions;
pub mod merchant_query;
