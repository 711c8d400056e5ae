//! Locating portal credentials.
//!
//! Environment variables win over the default credentials file, and a
//! missing default file is "not configured", not an error. A file the user
//! named explicitly wins over the environment and must exist.

use std::path::Path;

use cthru_api::types::Credentials;

use crate::error::CthruError;

pub const TOKEN_ENV: &str = "CTHRU_APP_TOKEN";
pub const SECRET_ENV: &str = "CTHRU_APP_SECRET";

/// Parses the `ID: <token>` / `secret: <secret>` file format.
///
/// Returns `None` when no token line is present.
pub fn parse_credentials_file(content: &str) -> Option<Credentials> {
    let mut app_token = None;
    let mut secret = None;
    for line in content.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("ID:") {
            app_token = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("secret:") {
            secret = Some(rest.trim().to_string());
        }
    }
    let app_token = app_token.filter(|t| !t.is_empty())?;
    Some(Credentials {
        app_token,
        secret: secret.filter(|s| !s.is_empty()),
    })
}

fn from_env() -> Option<Credentials> {
    let app_token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty())?;
    let secret = std::env::var(SECRET_ENV).ok().filter(|s| !s.trim().is_empty());
    Some(Credentials {
        app_token: app_token.trim().to_string(),
        secret: secret.map(|s| s.trim().to_string()),
    })
}

/// Reads credentials from a file path. `Ok(None)` when the file does not exist.
pub fn load_from_file(path: &Path) -> Result<Option<Credentials>, CthruError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(parse_credentials_file(&content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CthruError::Credentials(format!(
            "failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Environment first, then the file at `path`.
pub fn load(path: &Path) -> Result<Option<Credentials>, CthruError> {
    if let Some(creds) = from_env() {
        tracing::debug!("using credentials from {}", TOKEN_ENV);
        return Ok(Some(creds));
    }
    let creds = load_from_file(path)?;
    if creds.is_some() {
        tracing::debug!("using credentials from {}", path.display());
    }
    Ok(creds)
}

/// Only the file at `path`, which the user asked for by name. A missing
/// file or one without a token line is an error.
pub fn load_explicit(path: &Path) -> Result<Credentials, CthruError> {
    match load_from_file(path)? {
        Some(creds) => {
            tracing::debug!("using credentials from {}", path.display());
            Ok(creds)
        }
        None if path.exists() => Err(CthruError::Credentials(format!(
            "{} has no `ID:` line",
            path.display()
        ))),
        None => Err(CthruError::Credentials(format!(
            "credentials file {} not found",
            path.display()
        ))),
    }
}
