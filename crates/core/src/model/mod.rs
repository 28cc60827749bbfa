//! Merchant data model shared by the pipeline and its consumers.

pub mod diagnostic;
pub mod merchant;
pub mod query;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use merchant::{
    BUSINESS_NAME_FIELD, CATEGORY_FIELD, LATITUDE_FIELD, LONGITUDE_FIELD, MapPoint, MerchantRecord, ROAD_ADDRESS_FIELD,
    RawRow,
};
pub use query::{CategoryFilter, QueryOutcome, QueryResult, QueryStatus, Selection};
