//! OpenAI chat completions client
//!
//! Sends generation requests to an OpenAI-compatible `/chat/completions`
//! endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::{ChatMessage, CompletionRequest, TextGenerator};
use crate::config::Config;
use crate::error::{AppError, AppResult, GenerationError};

/// Build the shared HTTP client
pub fn build_http_client() -> AppResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(300))
        .build()?)
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI client used by the documentation pipeline
pub struct OpenAIClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client
    ///
    /// Fails when no API key is configured.
    pub fn new(client: reqwest::Client, config: &Config) -> AppResult<Self> {
        let api_key = config.openai.api_key.clone().ok_or_else(|| {
            AppError::Config(
                "OpenAI API key is not configured; set LUMEN_DOCS_OPENAI_API_KEY".to_string(),
            )
        })?;

        Ok(Self {
            client,
            base_url: config.openai.api_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.openai.model.clone(),
        })
    }

    /// Build headers with bearer authentication
    fn default_headers(&self) -> Result<HeaderMap, GenerationError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| GenerationError::InvalidCredential)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl TextGenerator for OpenAIClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    #[instrument(skip(self, request), fields(model = %self.model, max_tokens = request.max_tokens))]
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            n: 1,
            temperature: request.temperature,
        };

        debug!(url = %url, messages = request.messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send request to OpenAI");
                e
            })?;

        let status = response.status();
        debug!(status = %status, "OpenAI response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 {
                warn!(status = %status, "OpenAI rejected the API key");
                return Err(GenerationError::InvalidCredential);
            }

            error!(status = %status, body = %text, "OpenAI completion request failed");
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let text = response.text().await?;
        let parsed: ChatCompletionResponse = match serde_json::from_str(&text) {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, body = %text, "Failed to parse OpenAI response");
                return Err(GenerationError::Malformed(e.to_string()));
            }
        };

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}
