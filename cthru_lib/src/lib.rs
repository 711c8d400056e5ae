//! Library layer for the CTHRU client: dataset registry, filter-to-query
//! builder, credentials and settings, and result rendering.
//!
//! Wraps the `cthru_api` crate, which owns the query model and the HTTP
//! executor.

pub mod builder;
pub mod config;
pub mod credentials;
pub mod datasets;
pub mod error;
pub mod export;
pub mod filter;
pub mod render;
pub mod validation;

pub use cthru_api;
pub use cthru_api::types;
pub use cthru_api::{Client, Query, SortClause, SortDirection, StructuredQuery};

pub use builder::build;
pub use config::Settings;
pub use datasets::Registry;
pub use error::CthruError;
pub use export::{save_export, ExportDocument};
pub use filter::FilterSpec;
pub use render::{render, Destination, OutputFormat};
