//! Backend API client implementation

use crate::{
    config::ClientConfig,
    envelope,
    error::ApiError,
    token::{NoToken, StaticToken, TokenProvider},
};
use reqwest::{
    Client, RequestBuilder, StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;
use std::{fmt, sync::Arc, time::Instant};

/// Backend API client
///
/// Cheap to clone; clones share the connection pool and token provider.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a client from config, using the config token if one is set
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the base URL is not an absolute
    /// http(s) URL, or `ApiError::Build` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let token: Arc<dyn TokenProvider> = match &config.token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(NoToken),
        };
        Self::with_token_provider(config, token)
    }

    /// Create a client whose token is read from `token` on every request
    ///
    /// The config token is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    pub fn with_token_provider(
        config: &ClientConfig,
        token: Arc<dyn TokenProvider>,
    ) -> Result<Self, ApiError> {
        let base_url = validate_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Create a client from `MARKETDESK_*` environment variables
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&ClientConfig::from_env())
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` without query parameters
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-2xx responses, undecodable
    /// bodies, or an unsuccessful envelope.
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let request = self.http.get(self.url(path));
        self.execute("GET", path, request).await
    }

    /// GET `path` with `query` serialized as URL parameters
    ///
    /// `None` fields of the query struct are omitted.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn get_with<Q>(&self, path: &str, query: &Q) -> Result<Value, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        self.execute("GET", path, request).await
    }

    /// POST `body` as JSON to `path`
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.execute("POST", path, request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[tracing::instrument(skip(self, request))]
    async fn execute(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Value, ApiError> {
        let request = match self.token.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let started = Instant::now();
        let result = Self::dispatch(request).await;
        let elapsed = started.elapsed();

        let outcome = match &result {
            Ok(_) => "ok",
            Err(error) => error.kind(),
        };
        metrics::counter!("marketdesk.http.requests", "method" => method, "outcome" => outcome)
            .increment(1);
        metrics::histogram!("marketdesk.http.duration_seconds", "method" => method)
            .record(elapsed.as_secs_f64());

        match &result {
            Ok(_) => tracing::debug!(elapsed_ms = elapsed.as_millis(), "Request succeeded"),
            Err(error) => tracing::warn!(error = ?error, "Request failed"),
        }

        result
    }

    async fn dispatch(request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|body| envelope::message_of(&body));
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        let body = serde_json::from_slice::<Value>(&bytes).map_err(|e| ApiError::Decode {
            detail: e.to_string(),
        })?;

        envelope::unwrap(body)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn validate_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|_| ApiError::InvalidBaseUrl(raw.to_string()))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(trimmed.to_string()),
        _ => Err(ApiError::InvalidBaseUrl(raw.to_string())),
    }
}
