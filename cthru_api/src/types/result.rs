//! What a query execution hands back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row as returned by the portal: field name to value, in the order the
/// remote sent them.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Records from one executed query plus where and when they came from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub records: Vec<Record>,
    /// Exact URL the records were fetched from, query string included.
    pub request_url: String,
    /// Browsable page for the dataset. Carries no filters.
    pub portal_url: String,
    pub timestamp: DateTime<Utc>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Portal application credentials.
///
/// With a secret the pair is sent as HTTP Basic Auth; a bare token is sent in
/// the `X-App-Token` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_token: String,
    pub secret: Option<String>,
}

impl Credentials {
    pub fn new(app_token: &str, secret: &str) -> Self {
        Self {
            app_token: app_token.to_string(),
            secret: Some(secret.to_string()),
        }
    }

    pub fn token_only(app_token: &str) -> Self {
        Self {
            app_token: app_token.to_string(),
            secret: None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_token", &self.app_token)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}
