//! Text generation backend abstraction
//!
//! The pipeline only depends on [`TextGenerator`]: production runs use
//! [`OpenAIClient`], tests supply canned completions.

pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

pub use openai::OpenAIClient;

/// Role of a message participant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A chat message with role and content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One completion request: role-tagged messages plus an output budget
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// A request with a single user message
    pub fn user(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            max_tokens,
            temperature: None,
        }
    }

    /// Prepend a system message
    pub fn with_system(mut self, instructions: impl Into<String>) -> Self {
        self.messages.insert(0, ChatMessage::system(instructions));
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Content of the last user message
    pub fn prompt(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

/// Capability to turn a prompt into a single text completion
///
/// `Ok(None)` means the backend answered without usable content; callers
/// apply their own fallback. Output may differ between identical calls.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, GenerationError>;
}

/// Trim a completion, mapping blank text to `None`
pub fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
