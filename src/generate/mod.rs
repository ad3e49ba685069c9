//! Classification and content synthesis
//!
//! Both components delegate to a [`TextGenerator`](crate::llm::TextGenerator)
//! and own the fallback policy for its failures: an invalid credential aborts
//! the run, anything else degrades to a deterministic value.

pub mod classifier;
pub mod prompts;
pub mod synthesizer;

use tracing::warn;

use crate::error::{AppResult, GenerationError};
use crate::llm::non_empty;

pub use classifier::{Classifier, FALLBACK_CATEGORY};
pub use synthesizer::ContentSynthesizer;

/// Propagate fatal generation errors, log and absorb the rest
///
/// Returns the trimmed completion, or `None` when there is nothing usable.
pub(crate) fn recover(
    result: Result<Option<String>, GenerationError>,
    what: &str,
) -> AppResult<Option<String>> {
    match result {
        Ok(text) => Ok(non_empty(text)),
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            warn!(error = %e, what, "Text generation failed, using fallback");
            Ok(None)
        }
    }
}
