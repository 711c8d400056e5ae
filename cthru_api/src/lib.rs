//! Client for the CTHRU Socrata portal: dataset descriptors, the structured
//! query model with its SoQL compiler, and the HTTP executor.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::query::{
    soql, FilterValue, Operator, Predicate, Query, SortClause, SortDirection, StructuredQuery,
    DEFAULT_LIMIT,
};
