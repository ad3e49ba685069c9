//! Category and title assignment for operations

use std::sync::Arc;

use tracing::debug;

use super::{prompts, recover};
use crate::config::{Config, TokenLimits};
use crate::error::AppResult;
use crate::llm::{CompletionRequest, TextGenerator};
use crate::spec::Operation;

/// Category used when the backend gives no usable answer
pub const FALLBACK_CATEGORY: &str = "Uncategorized";

/// Assigns resource categories and page titles
pub struct Classifier {
    generator: Arc<dyn TextGenerator>,
    limits: TokenLimits,
}

impl Classifier {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &Config) -> Self {
        Self {
            generator,
            limits: config.openai.limits,
        }
    }

    /// Plural, title-cased resource name for an operation
    ///
    /// Falls back to [`FALLBACK_CATEGORY`] on any non-fatal failure.
    pub async fn classify(
        &self,
        tags: &[String],
        summary: &str,
        description: &str,
    ) -> AppResult<String> {
        let request = CompletionRequest::user(
            prompts::category(tags, summary, description),
            self.limits.category,
        )
        .with_system(prompts::CATEGORY_SYSTEM)
        .with_temperature(0.5);

        let category = recover(self.generator.complete(&request).await, "category")?
            .map(|c| clean_label(&c))
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

        debug!(category = %category, "Classified operation");
        Ok(category)
    }

    /// Page title for an operation, `"<METHOD> <path>"` on failure
    pub async fn title_for(&self, operation: &Operation<'_>) -> AppResult<String> {
        let request = CompletionRequest::user(
            prompts::title(operation.method(), operation.path(), operation.summary()),
            self.limits.title,
        );

        let title = recover(self.generator.complete(&request).await, "title")?
            .map(|t| clean_label(&t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| operation.id().to_string());
        Ok(title)
    }
}

/// First line of a completion without wrapping quotes or markdown emphasis
fn clean_label(raw: &str) -> String {
    raw.lines()
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '*' | '`' | '#'))
        .trim()
        .to_string()
}
