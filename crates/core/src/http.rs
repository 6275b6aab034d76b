//! Thin JSON client over the backend REST surface.
//!
//! Every call either yields the decoded payload or an [`ApiError`]. Transport failures,
//! non-2xx responses and undecodable bodies are all folded into that one shape so callers
//! never see a `reqwest` error.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, ConfigError, FieldErrors};
use crate::token::TokenStore;
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Laravel-style error body: `{"message": "...", "errors": {"field": ["..."]}}`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

/// Authenticated JSON client bound to one backend base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Builds a client from startup configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying HTTP client cannot be constructed.
    pub fn new(cfg: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            base_url: cfg.base_url().clone(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::GET, path, &[], None::<&()>).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        self.send(Method::GET, path, query, None::<&()>).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    /// `POST` with no request body, for action endpoints such as logout or restore.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::POST, path, &[], None::<&()>).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    /// `DELETE`; any response body is discarded.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send::<IgnoredAny, ()>(Method::DELETE, path, &[], None)
            .await
            .map(|_| ())
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::new(400, format!("invalid request path {path}: {e}")))
    }

    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "backend request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.tokens.get() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(format!("{method} {path} failed: {e}")))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(format!("{method} {path} body read failed: {e}")))?;

        if !status.is_success() {
            let err = error_from_body(status, &bytes);
            tracing::debug!(status = err.status, message = %err.message, "backend error");
            return Err(err);
        }

        // 204 and other empty bodies decode as JSON null.
        let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(payload).map_err(|e| {
            ApiError::new(
                status.as_u16(),
                format!("unexpected response from {method} {path}: {e}"),
            )
        })
    }
}

fn error_from_body(status: StatusCode, bytes: &[u8]) -> ApiError {
    let fallback = status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();

    match serde_json::from_slice::<ErrorBody>(bytes) {
        Ok(body) => {
            let message = body
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback);
            let err = ApiError::new(status.as_u16(), message);
            match body.errors {
                Some(errors) if !errors.is_empty() => err.with_field_errors(errors),
                _ => err,
            }
        }
        Err(_) => ApiError::new(status.as_u16(), fallback),
    }
}
