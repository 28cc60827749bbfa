//! User-facing diagnostics attached to a query outcome.

use serde::{Deserialize, Serialize};

use crate::Jurisdiction;

/// What went wrong (or what is worth telling the user) for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Credential missing or still the placeholder; no request was sent.
    Configuration,
    /// Network failure or timeout.
    Transport,
    /// Non-success HTTP status.
    Server,
    /// The registry answered with its own error code.
    Api,
    /// Response body did not match the expected envelope.
    Schema,
    /// The jurisdiction has no merchants with usable coordinates.
    NoData,
    /// The category filter removed every merchant.
    EmptyCategory,
}

impl DiagnosticKind {
    /// Stable code used in logs and tool output.
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::Configuration => "CONFIGURATION_ERROR",
            DiagnosticKind::Transport => "TRANSPORT_ERROR",
            DiagnosticKind::Server => "SERVER_ERROR",
            DiagnosticKind::Api => "API_ERROR",
            DiagnosticKind::Schema => "SCHEMA_ERROR",
            DiagnosticKind::NoData => "NO_DATA",
            DiagnosticKind::EmptyCategory => "EMPTY_CATEGORY",
        }
    }

    /// Advisories are informational; everything else is a failed fetch.
    pub fn is_error(self) -> bool {
        !matches!(self, DiagnosticKind::NoData | DiagnosticKind::EmptyCategory)
    }
}

/// A human-readable message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Verbatim response body, kept for schema failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), raw_body: None }
    }

    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = Some(body.into());
        self
    }

    pub fn no_data(jurisdiction: Jurisdiction) -> Self {
        Self::new(DiagnosticKind::NoData, format!("no merchant data for '{jurisdiction}'"))
    }

    pub fn empty_category(jurisdiction: Jurisdiction, category: &str) -> Self {
        Self::new(
            DiagnosticKind::EmptyCategory,
            format!("no merchants in category '{category}' for '{jurisdiction}'"),
        )
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}
