//! Core types and shared functionality for localpay.
//!
//! This crate provides:
//! - Merchant data model and coordinate normalization
//! - The fixed list of Gyeonggi-do jurisdictions
//! - In-memory result cache with time-to-live expiry
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod jurisdiction;
pub mod model;
pub mod normalize;

pub use cache::{CacheEntry, ResultCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use jurisdiction::Jurisdiction;
pub use model::{
    CategoryFilter, Diagnostic, DiagnosticKind, MapPoint, MerchantRecord, QueryOutcome, QueryResult, QueryStatus,
    RawRow, Selection,
};
pub use normalize::{CoordinateError, normalize, normalize_row, parse_coordinate};
