//! HTTP client for the CTHRU Socrata portal.

use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, StructuredQuery},
    types::{ColumnMetadata, Credentials, DatasetDescriptor, Record, ResultSet, ViewMetadata},
    Error,
};

/// Production portal address.
pub const DEFAULT_BASE_URL: &str = "https://cthru.data.socrata.com";

/// Upper bound on a single request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the CTHRU portal.
///
/// Each request builds a fresh `reqwest::Client` with the configured timeout.
/// Exactly one GET is issued per call and nothing is retried.
pub struct Client {
    /// Base URL for the portal. Defaults to [`DEFAULT_BASE_URL`].
    base_url: String,
    timeout: Duration,
    /// When false, [`Client::execute`] refuses to run without credentials.
    allow_anonymous: bool,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production portal.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            allow_anonymous: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lets [`Client::execute`] send unauthenticated requests when no
    /// credentials are supplied.
    pub fn with_anonymous_access(mut self, allow: bool) -> Self {
        self.allow_anonymous = allow;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/resource/{id}.json`, the SODA endpoint for a dataset.
    pub fn resource_url(&self, resource_id: &str) -> Result<Url, Error> {
        self.parse_url(&format!("/resource/{}.json", resource_id))
    }

    /// Browsable dataset page. Deliberately carries no query parameters.
    pub fn portal_url(&self, resource_id: &str) -> String {
        format!("{}/d/{}", self.base_url, resource_id)
    }

    fn parse_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed(format!("invalid URL: {}", e))
        })
    }

    async fn get<T>(&self, url: Url, credentials: Option<&Credentials>) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;

        let mut request = client.get(url.clone()).header("accept", "application/json");
        request = match credentials {
            Some(Credentials {
                app_token,
                secret: Some(secret),
            }) => request.basic_auth(app_token, Some(secret)),
            Some(Credentials {
                app_token,
                secret: None,
            }) => request.header("X-App-Token", app_token),
            None => request,
        };

        tracing::debug!("GET {}", url);
        let resp = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::error!("Request failed with status {}", status);
            return Err(Error::RemoteQuery {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(&body));
            Error::Parse(e.to_string())
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            tracing::error!("Request timed out after {:?}", self.timeout);
            Error::Timeout {
                after: self.timeout,
            }
        } else {
            tracing::error!("Failed to get resource: {}", e);
            Error::RequestFailed(e.to_string())
        }
    }

    /// Runs one query against a dataset and returns every record the portal sent.
    pub async fn execute(
        &self,
        dataset: &DatasetDescriptor,
        query: &StructuredQuery,
        credentials: Option<&Credentials>,
    ) -> Result<ResultSet, Error> {
        if credentials.is_none() && !self.allow_anonymous {
            return Err(Error::MissingCredentials);
        }

        let url = query.add_to_url(&self.resource_url(&dataset.resource_id)?);
        let records: Vec<Record> = self.get(url.clone(), credentials).await?;
        tracing::debug!("{} returned {} records", dataset.id, records.len());

        Ok(ResultSet {
            records,
            request_url: url.to_string(),
            portal_url: self.portal_url(&dataset.resource_id),
            timestamp: Utc::now(),
        })
    }

    /// Fetches column metadata for a dataset. Credentials are sent when given
    /// but not required.
    pub async fn fetch_columns(
        &self,
        resource_id: &str,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<ColumnMetadata>, Error> {
        let url = self.parse_url(&format!("/api/views/{}.json", resource_id))?;
        let view: ViewMetadata = self.get(url, credentials).await?;
        Ok(view.columns)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
