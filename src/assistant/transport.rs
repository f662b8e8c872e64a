//! Issuing the generation request.
//!
//! The session talks to a [`GenerateTransport`]. [`HttpTransport`] posts the
//! prompt to a generation endpoint such as `langassist serve`.
//! [`DirectTransport`] calls the provider in-process and yields the same raw
//! text bytes the proxy would have sent.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::consumer::ByteStream;
use crate::error::{AssistError, Result};
use crate::provider::ProviderClient;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body of the generation endpoint: `{"prompt": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Something that can turn a prompt into a streamed response body.
///
/// `Ok(None)` means the endpoint answered successfully but without a body.
#[async_trait]
pub trait GenerateTransport: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<ByteStream>>;

    /// Short human-readable description for `/config` output and logs.
    fn describe(&self) -> String;
}

/// Posts the prompt to a generation endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AssistError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerateTransport for HttpTransport {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<ByteStream>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|source| AssistError::Connect {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        tracing::debug!(%status, endpoint = %self.endpoint, "generate endpoint returned");

        if !status.is_success() {
            return Err(AssistError::from_status(status));
        }

        if status == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
            return Ok(None);
        }

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| AssistError::Stream(e.to_string())));

        Ok(Some(Box::pin(body)))
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Calls the upstream provider directly, without a proxy in between.
#[derive(Debug, Clone)]
pub struct DirectTransport {
    provider: ProviderClient,
    label: String,
}

impl DirectTransport {
    pub fn new(provider: ProviderClient, label: impl Into<String>) -> Self {
        Self {
            provider,
            label: label.into(),
        }
    }
}

#[async_trait]
impl GenerateTransport for DirectTransport {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<ByteStream>> {
        let text = self.provider.complete_stream(&request.prompt).await?;
        Ok(Some(Box::pin(text.map(|delta| delta.map(Bytes::from)))))
    }

    fn describe(&self) -> String {
        format!("{} (direct, {})", self.label, self.provider.model())
    }
}
