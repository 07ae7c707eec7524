//! Client configuration
//!
//! Layered as: built-in defaults, then persisted settings, then environment.

use std::time::Duration;

use crate::constants::{
    DEFAULT_TIMEOUT_SECS, ENV_API_BASE, ENV_API_TOKEN, ENV_TIMEOUT_SECS, ENV_USER_API_BASE,
};
use crate::storage::Settings;
use crate::web::Endpoint;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base: Endpoint,
    pub user_api_base: Endpoint,
    /// Bearer token for the official game API
    pub api_token: Option<String>,
    /// Session token for the user API
    pub session_token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base: Endpoint::game_api(),
            user_api_base: Endpoint::user_api(),
            api_token: None,
            session_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with persisted settings
    pub fn from_settings(settings: &Settings) -> Self {
        ClientConfig {
            api_token: non_blank(settings.api_token.clone()),
            session_token: settings.session.as_ref().map(|s| s.token.clone()),
            ..Self::default()
        }
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = non_blank(lookup(ENV_API_TOKEN)) {
            self.api_token = Some(token);
        }
        if let Some(base) = non_blank(lookup(ENV_API_BASE)) {
            self.api_base = Endpoint::from_owned(base);
        }
        if let Some(base) = non_blank(lookup(ENV_USER_API_BASE)) {
            self.user_api_base = Endpoint::from_owned(base);
        }
        match lookup(ENV_TIMEOUT_SECS).map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => self.timeout = Duration::from_secs(secs),
            Some(_) => tracing::warn!(var = ENV_TIMEOUT_SECS, "ignoring invalid timeout"),
            None => {}
        }
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
