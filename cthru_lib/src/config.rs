//! Runtime settings read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use cthru_api::types::Credentials;
use cthru_api::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use crate::credentials;
use crate::error::CthruError;

pub const BASE_URL_ENV: &str = "CTHRU_BASE_URL";
pub const TIMEOUT_ENV: &str = "CTHRU_TIMEOUT_SECS";
pub const CREDENTIALS_FILE_ENV: &str = "CTHRU_CREDENTIALS_FILE";

/// Default credentials file, relative to the working directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = "cthru_api";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub credentials_path: PathBuf,
    /// Set when the path came from the command line rather than a default.
    pub credentials_explicit: bool,
    pub allow_anonymous: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            credentials_explicit: false,
            allow_anonymous: false,
        }
    }
}

impl Settings {
    /// Loads `.env` if present, then reads the environment.
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("loaded environment from {}", path.display());
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup(BASE_URL_ENV)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout: lookup(TIMEOUT_ENV)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            credentials_path: lookup(CREDENTIALS_FILE_ENV)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.credentials_path),
            credentials_explicit: false,
            allow_anonymous: defaults.allow_anonymous,
        }
    }

    /// Uses `path` in place of the environment and the default file.
    pub fn with_credentials_path(mut self, path: PathBuf) -> Self {
        self.credentials_path = path;
        self.credentials_explicit = true;
        self
    }

    pub fn with_anonymous_access(mut self, allow: bool) -> Self {
        self.allow_anonymous = allow;
        self
    }

    pub fn load_credentials(&self) -> Result<Option<Credentials>, CthruError> {
        if self.credentials_explicit {
            return credentials::load_explicit(&self.credentials_path).map(Some);
        }
        credentials::load(&self.credentials_path)
    }

    pub fn client(&self) -> Client {
        Client::with_base_url(&self.base_url)
            .with_timeout(self.timeout)
            .with_anonymous_access(self.allow_anonymous)
    }
}
