//! Client code for localpay.
//!
//! This crate provides the merchant registry HTTP client and the query
//! pipeline shared by the server and CLI.

pub mod pipeline;
pub mod registry;

pub use pipeline::QueryPipeline;
pub use registry::{
    FetchOutcome, MerchantSource, RegistryClient, RegistryConfig, RegistryError, RegistryRequest, parse_envelope,
};
