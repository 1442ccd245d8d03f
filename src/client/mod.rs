//! Typed HTTP client for the platform REST API
//!
//! Every endpoint answers with the `{success, data?, error?|message?}`
//! envelope; this module decodes it once so the managers only see typed
//! payloads or a [`ConsoleError`].

pub mod token;

pub use token::TokenStore;

use crate::config::ApiConfig;
use crate::utils::error::{ConsoleError, Result};
use reqwest::{Client, ClientBuilder, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Standard response envelope used by every platform endpoint
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the backend accepted the request
    pub success: bool,
    /// Payload on success
    pub data: Option<T>,
    /// Free-text error, some endpoints use this field
    pub error: Option<String>,
    /// Free-text error, other endpoints use this one
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Collapse the envelope into a typed result.
    ///
    /// `success: false` maps to [`ConsoleError::Backend`] with whichever of
    /// `error` / `message` is populated; there is no machine-readable code
    /// taxonomy beyond that.
    pub fn into_result(self) -> Result<T> {
        if !self.success {
            return Err(ConsoleError::Backend(failure_message(
                self.error,
                self.message,
            )));
        }
        self.data
            .ok_or_else(|| ConsoleError::Backend("success without payload".to_string()))
    }

    /// Like [`Self::into_result`] but for endpoints whose payload is not
    /// interesting (mutations often answer with a bare `success: true`).
    pub fn into_ack(self) -> Result<()> {
        if self.success {
            return Ok(());
        }
        Err(ConsoleError::Backend(failure_message(
            self.error,
            self.message,
        )))
    }
}

/// Pick the populated error field, `error` before `message`
fn failure_message(error: Option<String>, message: Option<String>) -> String {
    error
        .filter(|e| !e.is_empty())
        .or(message)
        .unwrap_or_else(|| "unspecified backend error".to_string())
}

/// HTTP client bound to the platform API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    tokens: Arc<TokenStore>,
    http_client: Client,
}

impl ApiClient {
    /// Build a client from API settings and a token store
    pub fn new(config: ApiConfig, tokens: Arc<TokenStore>) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| ConsoleError::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let http_client = builder
            .build()
            .map_err(|e| ConsoleError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            tokens,
            http_client,
        })
    }

    /// Base URL this client is bound to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Token store backing this client
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// GET a typed payload
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    /// POST a JSON body, returning the typed payload
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PUT a JSON body, returning the typed payload
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// DELETE, returning the typed payload
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<(), T>(Method::DELETE, path, None).await
    }

    /// POST a JSON body where only the acknowledgement matters
    pub async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.request_ack(Method::POST, path, Some(body)).await
    }

    /// PUT a JSON body where only the acknowledgement matters
    pub async fn put_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.request_ack(Method::PUT, path, Some(body)).await
    }

    /// DELETE where only the acknowledgement matters
    pub async fn delete_ack(&self, path: &str) -> Result<()> {
        self.request_ack::<()>(Method::DELETE, path, None).await
    }

    async fn request_ack<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()> {
        let token = self.tokens.require()?;
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!("{} {}", method, url);

        let mut request = self
            .http_client
            .request(method, &url)
            .bearer_auth(token.as_str());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ConsoleError::Api {
                status: status.as_u16(),
                message: if text.is_empty() {
                    status.to_string()
                } else {
                    text
                },
            });
        }

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(&text)?;
        envelope.into_ack()
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let token = self.tokens.require()?;
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!("{} {}", method, url);

        let mut request = self
            .http_client
            .request(method, &url)
            .bearer_auth(token.as_str());

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Map the raw response through status check and envelope decode
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ConsoleError::Api {
                status: status.as_u16(),
                message: if text.is_empty() {
                    status.to_string()
                } else {
                    text
                },
            });
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&text)?;
        envelope.into_result()
    }
}
