//! Request error taxonomy
//!
//! [`BuildError`] means the request could not be formed and nothing was sent.
//! [`FetchError`] covers everything after that point. Both are `Clone` so a
//! single result can be fanned out to every waiter of a shared request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The request could not be constructed. No I/O was attempted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("request URL unavailable: missing or invalid input")]
    UrlUnavailable,
    #[error("malformed request URL `{url}`")]
    InvalidUrl { url: String },
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
}

/// Error body returned by the game API on non-2xx responses
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure of a request, from construction through decoding.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("HTTP {status}{}", reason_suffix(.body))]
    Status { status: u16, body: ApiErrorBody },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("request failed: {0}")]
    Request(String),
}

fn reason_suffix(body: &ApiErrorBody) -> String {
    body.reason
        .as_deref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default()
}

impl FetchError {
    /// True when the failure happened before anything was sent
    pub fn is_build(&self) -> bool {
        matches!(self, FetchError::Build(_))
    }

    /// True for `404 notFound`, reported as an unknown tag for lookups
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_includes_reason() {
        let err = FetchError::Status {
            status: 404,
            body: ApiErrorBody {
                reason: Some("notFound".into()),
                message: None,
            },
        };
        assert_eq!(err.to_string(), "HTTP 404 (notFound)");
        assert!(err.is_not_found());
        assert!(!err.is_build());
    }

    #[test]
    fn test_build_error_converts() {
        let err: FetchError = BuildError::UrlUnavailable.into();
        assert!(err.is_build());
    }
}
