//! Error types for the library layer.

use std::fmt;

use cthru_api::types::LogicalFilter;

/// Errors produced by the library layer, wrapping upstream API errors and
/// adding dataset lookup, input validation and rendering failures.
#[derive(Debug)]
pub enum CthruError {
    /// An error from the underlying API client.
    Api(cthru_api::Error),
    /// The dataset name is not in the registry.
    UnknownDataset { name: String, available: Vec<String> },
    /// The sort expression names an unknown field or direction.
    InvalidSort { input: String, reason: String },
    /// `limit` was zero or negative.
    InvalidLimit(i64),
    /// `offset` was negative.
    InvalidOffset(i64),
    /// The filter has no column on this dataset.
    UnsupportedFilter {
        dataset: String,
        filter: LogicalFilter,
    },
    /// User-provided input failed validation.
    InvalidInput(String),
    /// The credentials source exists but could not be read.
    Credentials(String),
    /// Serialization or writing to the destination failed.
    Render(String),
}

impl CthruError {
    /// True for errors caused by what the user typed, raised before any
    /// network call.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownDataset { .. }
                | Self::InvalidSort { .. }
                | Self::InvalidLimit(_)
                | Self::InvalidOffset(_)
                | Self::UnsupportedFilter { .. }
                | Self::InvalidInput(_)
        )
    }
}

impl fmt::Display for CthruError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{}", e),
            Self::UnknownDataset { name, available } => write!(
                f,
                "Unknown dataset '{}'. Available: {}",
                name,
                available.join(", ")
            ),
            Self::InvalidSort { input, reason } => {
                write!(f, "Invalid sort '{}': {}", input, reason)
            }
            Self::InvalidLimit(limit) => {
                write!(f, "Invalid limit {}: must be a positive integer", limit)
            }
            Self::InvalidOffset(offset) => {
                write!(f, "Invalid offset {}: must not be negative", offset)
            }
            Self::UnsupportedFilter { dataset, filter } => write!(
                f,
                "The {} dataset cannot be filtered by {}",
                dataset, filter
            ),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Credentials(msg) => write!(f, "Credentials error: {}", msg),
            Self::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for CthruError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<cthru_api::Error> for CthruError {
    fn from(e: cthru_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<csv::Error> for CthruError {
    fn from(e: csv::Error) -> Self {
        Self::Render(e.to_string())
    }
}

impl From<serde_json::Error> for CthruError {
    fn from(e: serde_json::Error) -> Self {
        Self::Render(e.to_string())
    }
}

impl From<std::io::Error> for CthruError {
    fn from(e: std::io::Error) -> Self {
        Self::Render(e.to_string())
    }
}
