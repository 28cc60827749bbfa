//! Merchant registry client error types.

use std::sync::Arc;

use localpay_core::{Diagnostic, DiagnosticKind};

/// Errors from the merchant registry client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    /// API key unset, blank, or still the placeholder.
    #[error("missing API key: set LOCALPAY_API_KEY to a personal Gyeonggi open-data key")]
    MissingCredential,

    /// Base URL could not be turned into a request URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Request timeout.
    #[error("request timeout: the merchant registry did not respond in time")]
    Timeout,

    /// Network error.
    #[error("network error: cannot reach the merchant registry ({0})")]
    Transport(Arc<reqwest::Error>),

    /// Non-success HTTP status.
    #[error("server error: merchant registry responded with HTTP {status}")]
    Server { status: u16 },

    /// The registry reported its own error code in the response body.
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// Response body did not match the expected envelope.
    #[error("unexpected response shape: {reason}")]
    Schema { reason: String, raw_body: String },
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { RegistryError::Timeout } else { RegistryError::Transport(Arc::new(err)) }
    }
}

impl RegistryError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            RegistryError::MissingCredential | RegistryError::InvalidEndpoint(_) => DiagnosticKind::Configuration,
            RegistryError::Timeout | RegistryError::Transport(_) => DiagnosticKind::Transport,
            RegistryError::Server { .. } => DiagnosticKind::Server,
            RegistryError::Api { .. } => DiagnosticKind::Api,
            RegistryError::Schema { .. } => DiagnosticKind::Schema,
        }
    }

    pub(crate) fn schema(reason: impl Into<String>, raw_body: &str) -> Self {
        RegistryError::Schema { reason: reason.into(), raw_body: raw_body.to_string() }
    }
}

impl From<RegistryError> for Diagnostic {
    fn from(err: RegistryError) -> Self {
        let diagnostic = Diagnostic::new(err.kind(), err.to_string());
        match err {
            RegistryError::Schema { raw_body, .. } => diagnostic.with_raw_body(raw_body),
            _ => diagnostic,
        }
    }
}
