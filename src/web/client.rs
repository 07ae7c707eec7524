//! HTTP executor - turns descriptors into requests and decodes the replies

use std::sync::{Arc, RwLock};
use std::time::Instant;

use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::constants::{APP_NAME, APP_VERSION};
use crate::web::error::{ApiErrorBody, BuildError, FetchError};
use crate::web::{DecodeConvertible, HeaderMode, WebGettable, WebPostable};

/// Shared executor for every descriptor in the app.
///
/// GET descriptors target the official API and always carry the game API
/// token. POST descriptors target the user API and carry the session token
/// only when their [`HeaderMode`] asks for it.
#[derive(Clone, Debug)]
pub struct WebClient {
    http: reqwest::Client,
    api_token: Option<Arc<str>>,
    session_token: Arc<RwLock<Option<String>>>,
}

impl WebClient {
    /// Create a client with the configured timeout
    pub fn new(config: &ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("{}/{}", APP_NAME.replace(' ', "-"), APP_VERSION))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_http(http, config)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http(http: reqwest::Client, config: &ClientConfig) -> Self {
        WebClient {
            http,
            api_token: config.api_token.as_deref().map(Arc::from),
            session_token: Arc::new(RwLock::new(config.session_token.clone())),
        }
    }

    pub fn session_token(&self) -> Option<String> {
        self.session_token
            .read()
            .ok()
            .and_then(|token| token.clone())
    }

    /// Replace the user session token for all clones of this client
    pub fn set_session_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.session_token.write() {
            *slot = token;
        }
    }

    /// Build a GET request without sending it
    pub fn build_get<R: WebGettable>(&self, request: &R) -> Result<RequestBuilder, BuildError> {
        let url = parse_url(request.url_string())?;
        let token = self
            .api_token
            .as_deref()
            .ok_or(BuildError::MissingCredentials("game API token"))?;

        Ok(self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json"))
    }

    /// Build a POST request without sending it
    pub fn build_post<R: WebPostable>(&self, request: &R) -> Result<RequestBuilder, BuildError> {
        let url = parse_url(request.url_string())?;
        let mut builder = self.http.post(url).header(ACCEPT, "application/json");

        match R::HEADER_MODE {
            HeaderMode::None => {}
            HeaderMode::Authenticated => {
                let token = self
                    .session_token()
                    .ok_or(BuildError::MissingCredentials("user session"))?;
                builder = builder.bearer_auth(token);
            }
        }

        if let Some(body) = request.postable_value() {
            builder = builder.json(&body);
        }

        Ok(builder)
    }

    /// Execute a GET descriptor and return its converted response
    pub async fn get<R: WebGettable>(&self, request: &R) -> Result<R::Response, FetchError> {
        let builder = self.build_get(request).inspect_err(|e| {
            tracing::debug!(error = %e, "GET request not built");
        })?;
        self.execute(builder).await
    }

    /// Execute a POST descriptor and return its converted response
    pub async fn post<R: WebPostable>(&self, request: &R) -> Result<R::Response, FetchError> {
        let builder = self.build_post(request).inspect_err(|e| {
            tracing::debug!(error = %e, mode = R::HEADER_MODE.as_str(), "POST request not built");
        })?;
        self.execute(builder).await
    }

    async fn execute<T>(&self, builder: RequestBuilder) -> Result<T, FetchError>
    where
        T: DeserializeOwned + DecodeConvertible,
    {
        let start = Instant::now();
        let resp = builder.send().await?;
        let status = resp.status();
        let url = resp.url().clone();
        let body = resp.text().await?;
        let time_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let body = serde_json::from_str::<ApiErrorBody>(&body).unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), reason = ?body.reason, time_ms, "Request rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: T = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%url, error = %e, "Response did not match the expected shape");
            FetchError::Decode(e.to_string())
        })?;
        tracing::debug!(%url, status = status.as_u16(), time_ms, "Request completed");

        Ok(value.convert())
    }
}

fn parse_url(url: Option<String>) -> Result<Url, BuildError> {
    let url = url.ok_or(BuildError::UrlUnavailable)?;
    Url::parse(&url).map_err(|_| BuildError::InvalidUrl { url })
}
