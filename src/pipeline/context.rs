//! Run logging utilities
//!
//! Provides a short correlation id and timing for one generation run so every
//! log line of the run can be tied together.

use std::time::Instant;
use tracing::{debug, error, info, warn, Span};
use uuid::Uuid;

use super::PipelineState;
use crate::spec::OperationId;

/// Context for tracking one generation run
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Unique identifier for this run (for log correlation)
    pub run_id: String,
    /// When the run started
    pub start_time: Instant,
    /// Text generation backend in use
    pub backend: String,
    /// Version number claimed by the run, once known
    pub version: Option<u32>,
}

impl RunContext {
    /// Create a new run context
    pub fn new(backend: &str) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            backend: backend.to_string(),
            version: None,
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    pub fn log_run_start(&self, spec: &str) {
        info!(
            run_id = %self.run_id,
            backend = %self.backend,
            spec = %spec,
            "Generation run started"
        );
    }

    /// Log a state machine transition
    pub fn log_transition(&self, from: PipelineState, to: PipelineState) {
        debug!(
            run_id = %self.run_id,
            version = ?self.version,
            from = ?from,
            to = ?to,
            elapsed_ms = %self.elapsed_ms(),
            "Pipeline transition"
        );
    }

    pub fn log_endpoint_skipped(&self, operation: &OperationId) {
        warn!(
            run_id = %self.run_id,
            method = %operation.method,
            path = %operation.path,
            "Endpoint left out of the documentation"
        );
    }

    pub fn log_run_complete(&self, pages: usize, changed: usize, skipped: usize) {
        info!(
            run_id = %self.run_id,
            version = ?self.version,
            pages = %pages,
            changed = %changed,
            skipped = %skipped,
            elapsed_ms = %self.elapsed_ms(),
            "Generation run completed"
        );
    }

    /// Log run failure
    pub fn log_error(&self, error: &str) {
        error!(
            run_id = %self.run_id,
            backend = %self.backend,
            version = ?self.version,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "Generation run failed"
        );
    }

    /// Create a tracing span for this run
    pub fn create_span(&self) -> Span {
        tracing::info_span!("generation_run", run_id = %self.run_id, backend = %self.backend)
    }
}
