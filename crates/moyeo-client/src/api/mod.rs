//! Typed gateway over the moyeo HTTP API.
//!
//! One submodule per resource; every endpoint goes through the shared
//! envelope handling here. Failures carry the server's `message` verbatim
//! so the front end can show it unchanged.

use anyhow::{Context, Result, bail};
use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use moyeo_types::api::ApiResponse;

mod auth;
mod chat;
mod evaluations;
mod inquiries;
mod meetings;
mod notifications;
mod stores;
mod users;

pub use meetings::MeetingQuery;
pub use stores::StoreQuery;

/// HTTP API client. Cheap to construct; holds one connection pool.
#[derive(Debug, Clone)]
pub struct Api {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl Api {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            bearer: None,
        }
    }

    /// Attaches the bearer credential sent with every request.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn set_bearer(&mut self, token: impl Into<String>) {
        self.bearer = Some(token.into());
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path))
    }

    /// Sends the request and unwraps the `{success, data?, message?}`
    /// envelope. On `success: false` the error is the server's message
    /// when present, else a generic fallback with the HTTP status.
    async fn envelope<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<ApiResponse<T>> {
        let builder = match &self.bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await.context("request failed")?;
        let status = response.status();
        let payload: ApiResponse<T> = response
            .json()
            .await
            .with_context(|| format!("failed to decode response (status {status})"))?;
        if !payload.success {
            let message = payload
                .message
                .unwrap_or_else(|| format!("request failed with status {status}"));
            tracing::debug!(%status, %message, "api request rejected");
            bail!("{message}");
        }
        Ok(payload)
    }

    /// Envelope unwrap for endpoints whose `data` is required.
    async fn expect_data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        self.envelope::<T>(builder)
            .await?
            .data
            .context("response missing data")
    }

    /// Envelope unwrap for endpoints that only signal success.
    async fn expect_ok(&self, builder: RequestBuilder) -> Result<()> {
        let _ = self.envelope::<serde_json::Value>(builder).await?;
        Ok(())
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.expect_data(self.post(path).json(body)).await
    }
}
