use std::sync::Arc;

use crate::constants::{DEFAULT_API_BASE, DEFAULT_USER_API_BASE};

/// Base URL of a service. Cheap to clone, so every descriptor can carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    inner: Arc<str>,
}

/// Constructors
impl Endpoint {
    pub fn from_static(url: &'static str) -> Self {
        Self { inner: Arc::from(url) }
    }

    pub fn from_owned(url: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            inner: Arc::from(url.trim_end_matches('/')),
        }
    }

    /// Official game API
    pub fn game_api() -> Self {
        Self::from_static(DEFAULT_API_BASE)
    }

    /// Companion user API
    pub fn user_api() -> Self {
        Self::from_static(DEFAULT_USER_API_BASE)
    }
}

/// Getters
impl Endpoint {
    pub fn base_url(&self) -> &str {
        &self.inner
    }

    /// Join a path (starting with `/`) onto the base URL
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.inner, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_endpoint_trims_trailing_slash() {
        let endpoint = Endpoint::from_owned("http://127.0.0.1:8080/v1/");
        assert_eq!(endpoint.base_url(), "http://127.0.0.1:8080/v1");
        assert_eq!(endpoint.join("/cards"), "http://127.0.0.1:8080/v1/cards");
    }
}
