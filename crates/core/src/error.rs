//! Unified error types for localpay.
//!
//! Fetch failures never show up here: the query pipeline turns them into
//! [`Diagnostic`](crate::Diagnostic) values. These cover caller mistakes and
//! startup problems.

use rmcp::model::{ErrorCode, ErrorData as McpError};

use crate::config::ConfigError;

/// Unified error types for localpay.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an empty jurisdiction).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Jurisdiction name is not one of the fixed Gyeonggi-do districts.
    #[error("UNKNOWN_JURISDICTION: {0}")]
    UnknownJurisdiction(String),

    /// Configuration could not be loaded or failed validation.
    #[error("CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::UnknownJurisdiction(name) => (-32602, format!("unknown jurisdiction: {name}")),
            Error::Config(e) => (-32001, e.to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
