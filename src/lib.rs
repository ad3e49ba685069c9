//! Lumen Docs - AI-assisted API documentation generator
//!
//! This library turns an OpenAPI document into a GitBook-style Markdown tree.
//! Operations are grouped into categories and described by a text-generation
//! backend; every run is versioned so changes between runs can be reported.

pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod generate;
pub mod llm;
pub mod pipeline;
pub mod publish;
pub mod spec;
pub mod versioning;

pub use crate::config::{Config, ProjectPaths};
pub use crate::error::{AppError, AppResult, GenerationError};
pub use crate::llm::{OpenAIClient, TextGenerator};
pub use crate::pipeline::{GenerationReport, Pipeline, PipelineState};
pub use crate::spec::Specification;
pub use crate::versioning::SpecStore;
