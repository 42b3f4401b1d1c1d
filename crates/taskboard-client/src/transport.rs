//! HTTP transport: one place that sends requests and classifies failures.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AppError, ErrorKind};

/// Backend origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Backend origin, e.g. `http://localhost:3001`.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Thin wrapper over [`reqwest::Client`] bound to one backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the configured origin.
    ///
    /// # Errors
    /// Returns an error when the underlying HTTP client cannot be constructed.
    pub fn new(options: ClientOptions) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(concat!("taskboard/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .build()
            .map_err(|err| {
                AppError::new(ErrorKind::Unknown, "failed to build HTTP client").with_source(err)
            })?;
        Ok(Self {
            http,
            base_url: options.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Origin every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path starting with `/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and decode its outcome.
    ///
    /// Returns `Ok(None)` for successful responses that do not declare a JSON
    /// body (204, empty bodies, plain text).
    ///
    /// # Errors
    /// Returns a network error when no response arrived, a status-classified
    /// error for non-2xx responses, and an unknown error when a JSON success
    /// body cannot be decoded.
    pub async fn api_request<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, AppError> {
        let response = request.send().await.map_err(AppError::transport)?;
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_default().to_owned();
            // An unreadable error body is treated like an unparseable one.
            let body = response.bytes().await.unwrap_or_default();
            let err = AppError::from_response(status.as_u16(), &reason, &body);
            debug!(
                status = status.as_u16(),
                kind = %err.kind(),
                message = err.message(),
                "backend rejected request"
            );
            return Err(err);
        }

        if !declares_json(response.headers()) {
            return Ok(None);
        }
        let body = response.bytes().await.map_err(AppError::transport)?;
        if body.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&body).map(Some).map_err(AppError::decode)
    }

    /// `GET` with query parameters appended in order.
    ///
    /// # Errors
    /// See [`ApiClient::api_request`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Option<T>, AppError> {
        debug!(path, params = params.len(), "GET");
        let request = self.http.get(self.endpoint(path)).query(params);
        self.api_request(request).await
    }

    /// `POST` a multipart form.
    ///
    /// # Errors
    /// See [`ApiClient::api_request`].
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<Option<T>, AppError> {
        debug!(path, "POST multipart");
        let request = self.http.post(self.endpoint(path)).multipart(form);
        self.api_request(request).await
    }

    /// `PUT` a JSON body.
    ///
    /// # Errors
    /// See [`ApiClient::api_request`].
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, AppError> {
        debug!(path, "PUT");
        let request = self.http.put(self.endpoint(path)).json(body);
        self.api_request(request).await
    }

    /// `DELETE` without a body.
    ///
    /// # Errors
    /// See [`ApiClient::api_request`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AppError> {
        debug!(path, "DELETE");
        let request = self.http.delete(self.endpoint(path));
        self.api_request(request).await
    }
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}
