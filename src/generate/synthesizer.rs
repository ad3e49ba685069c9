//! Markdown content generation
//!
//! Produces the introduction page, one overview per category and one page per
//! endpoint.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{prompts, recover};
use crate::config::{Config, TokenLimits};
use crate::error::AppResult;
use crate::llm::{non_empty, CompletionRequest, TextGenerator};
use crate::spec::ParsedEndpoint;

pub const FALLBACK_INTRODUCTION: &str = "# Introduction\n\nWelcome to our API documentation.";

/// Generates Markdown bodies through a text generator
pub struct ContentSynthesizer {
    generator: Arc<dyn TextGenerator>,
    limits: TokenLimits,
    tone: String,
    temperature: f32,
    api_title: Option<String>,
}

impl ContentSynthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &Config) -> Self {
        Self {
            generator,
            limits: config.openai.limits,
            tone: config.openai.tone.clone(),
            temperature: config.openai.temperature,
            api_title: None,
        }
    }

    /// Name the API in the introduction prompt
    pub fn with_api_title(mut self, title: Option<&str>) -> Self {
        self.api_title = title.map(str::to_string);
        self
    }

    /// Project-wide introduction page
    pub async fn introduction(&self) -> AppResult<String> {
        let request = CompletionRequest::user(
            prompts::introduction(self.api_title.as_deref(), &self.tone),
            self.limits.introduction,
        );
        let text = recover(self.generator.complete(&request).await, "introduction")?;
        Ok(text.unwrap_or_else(|| FALLBACK_INTRODUCTION.to_string()))
    }

    /// Overview page for one category
    pub async fn resource_overview(
        &self,
        category: &str,
        endpoints: &[ParsedEndpoint],
    ) -> AppResult<String> {
        let request = CompletionRequest::user(
            prompts::resource_overview(category, endpoints, &self.tone),
            self.limits.overview,
        );
        let text = recover(self.generator.complete(&request).await, "resource overview")?;
        Ok(text.unwrap_or_else(|| fallback_overview(category)))
    }

    /// Page for one endpoint
    ///
    /// `Ok(None)` means generation failed and the endpoint should be left out
    /// of the tree. An empty completion yields a minimal page built from the
    /// endpoint's own description.
    pub async fn endpoint_content(&self, endpoint: &ParsedEndpoint) -> AppResult<Option<String>> {
        let request = CompletionRequest::user(
            prompts::endpoint(endpoint, &self.tone),
            self.limits.endpoint,
        )
        .with_temperature(self.temperature);

        match self.generator.complete(&request).await {
            Ok(text) => {
                let content = non_empty(text).unwrap_or_else(|| {
                    debug!(method = %endpoint.method, path = %endpoint.path, "Empty completion, using fallback page");
                    fallback_endpoint(endpoint)
                });
                Ok(Some(content))
            }
            Err(e) if e.is_fatal() => Err(e.into()),
            Err(e) => {
                warn!(
                    method = %endpoint.method,
                    path = %endpoint.path,
                    error = %e,
                    "Skipping endpoint, content generation failed"
                );
                Ok(None)
            }
        }
    }
}

pub fn fallback_overview(category: &str) -> String {
    format!("# {0} API\n\nOverview of {0} API endpoints.", category)
}

pub fn fallback_endpoint(endpoint: &ParsedEndpoint) -> String {
    format!(
        "# {} {}\n\n{}",
        endpoint.method, endpoint.path, endpoint.description
    )
}
