use futures_util::Stream;
use reqwest::Client;
use serde::Serialize;
use std::pin::Pin;
use std::time::Duration;

use super::sse_parser::sse_to_text_stream;
use crate::error::{AssistError, Result};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Text deltas produced by the provider, in order.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Streaming client for an OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    options: CompletionOptions,
}

impl ProviderClient {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: Option<String>,
        options: CompletionOptions,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AssistError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            model,
            api_key,
            options,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` as a single user message and streams the completion text back.
    pub async fn complete_stream(&self, prompt: &str) -> Result<TextStream> {
        let url = format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        );

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
            stream: true,
        };

        let mut http_request = self.client.post(&url).json(&body);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        tracing::debug!(%url, model = %self.model, "requesting completion");

        let response = http_request
            .send()
            .await
            .map_err(|source| AssistError::Connect {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %detail, "provider rejected completion request");
            return Err(AssistError::from_status(status));
        }

        Ok(Box::pin(sse_to_text_stream(response.bytes_stream())))
    }
}
