//! Single-attempt HTTP client for the backend. Every call is sent
//! exactly once; failures are logged and handed back to the caller.

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use super::ApiError;
use crate::core::AppConfig;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::DELETE, path, None).await
    }

    /// Sends one request and decodes the JSON body. Non-2xx responses
    /// become `ApiError::Api`, connection problems `ApiError::Transport`.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%method, %url, "Sending API request");

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|err| {
            tracing::error!(%method, %url, error = %err, "API request failed to complete");
            ApiError::Transport(err)
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|err| {
            tracing::error!(%method, %url, error = %err, "Failed to read API response");
            ApiError::Transport(err)
        })?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &text, None);
            tracing::error!(%method, %url, status = status.as_u16(), error = %err, "API error");
            return Err(err);
        }

        // Some endpoints answer 2xx with no body at all
        let text = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(text).map_err(|err| {
            tracing::error!(%method, %url, error = %err, "Unexpected API response body");
            ApiError::Decode(err.to_string())
        })
    }
}
