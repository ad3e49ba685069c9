//! Common test utilities for Lumen Docs
//!
//! Shared fixtures, a deterministic text generator and project helpers used
//! across the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;
use walkdir::WalkDir;

use lumen_docs::llm::CompletionRequest;
use lumen_docs::{Config, GenerationError, ProjectPaths, TextGenerator};

/// Test configuration constants
pub mod constants {
    /// Default test API key for OpenAI
    pub const TEST_OPENAI_API_KEY: &str = "test-openai-api-key";
    /// Default test API key for GitBook
    pub const TEST_GITBOOK_API_KEY: &str = "test-gitbook-api-key";
    /// Test GitBook space
    pub const TEST_SPACE_ID: &str = "space_123";
}

/// Config pointing both backends at mock servers
pub fn test_config(openai_url: &str, gitbook_url: &str) -> Config {
    let mut config = Config::default();
    config.openai.api_url = openai_url.to_string();
    config.openai.api_key = Some(constants::TEST_OPENAI_API_KEY.to_string());
    config.gitbook.api_url = gitbook_url.to_string();
    config.gitbook.api_key = Some(constants::TEST_GITBOOK_API_KEY.to_string());
    config.gitbook.space_id = Some(constants::TEST_SPACE_ID.to_string());
    config.gitbook.enabled = true;
    config
}

/// A small shop API: three resources, one untagged health check
pub fn shop_spec() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": { "title": "Shop", "version": "1.0.0" },
        "paths": {
            "/users": {
                "get": {
                    "tags": ["users"],
                    "summary": "List users",
                    "responses": { "200": { "description": "OK" } }
                },
                "post": {
                    "tags": ["users"],
                    "summary": "Create user",
                    "requestBody": {
                        "content": { "application/json": { "schema": { "type": "object" } } }
                    },
                    "responses": { "201": { "description": "Created" } }
                }
            },
            "/users/{id}": {
                "parameters": [{ "name": "id", "in": "path", "required": true }],
                "get": {
                    "tags": ["users"],
                    "summary": "Get user",
                    "responses": { "200": { "description": "OK" } }
                },
                "delete": {
                    "tags": ["users"],
                    "summary": "Delete user",
                    "responses": { "204": { "description": "Deleted" } }
                }
            },
            "/orders": {
                "get": {
                    "tags": ["orders"],
                    "summary": "List orders",
                    "responses": { "200": { "description": "OK" } }
                }
            },
            "/": {
                "get": {
                    "responses": { "200": { "description": "Alive" } }
                }
            }
        }
    })
}

/// Number of operations in [`shop_spec`]
pub const SHOP_OPERATIONS: usize = 6;

/// Answers each prompt kind with text derived only from the prompt
///
/// Categories come from the first tag, titles from the summary, endpoint
/// pages from method and path. Endpoint prompts for `failing_paths` fail
/// with a server error.
#[derive(Default)]
pub struct StubGenerator {
    failing_paths: HashSet<String>,
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make endpoint content generation fail for `path`
    pub fn failing_on(mut self, path: &str) -> Self {
        self.failing_paths.insert(path.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let rest = &text[text.find(start)? + start.len()..];
    Some(&rest[..rest.find(end)?])
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = request.prompt();

        if prompt.starts_with("Given the following API operation details") {
            let tags = between(prompt, "Tags: ", "\n").unwrap_or("");
            let first = tags.split(", ").next().unwrap_or("");
            return Ok(Some(title_case(first)));
        }
        if prompt.starts_with("Given this API operation") {
            let summary = between(prompt, "Summary: ", ", generate").unwrap_or("");
            return Ok(Some(summary.to_string()));
        }
        if prompt.starts_with("Generate an introduction") {
            return Ok(Some("# Welcome\n\nThe Shop API.".to_string()));
        }
        if prompt.starts_with("Generate an overview for the ") {
            let category = between(prompt, "Generate an overview for the ", " API.").unwrap_or("");
            return Ok(Some(format!("# {}\n\nOverview of {}.", category, category)));
        }

        let method = between(prompt, "Method: ", "\n").unwrap_or("");
        let path = between(prompt, "Path: ", "\n").unwrap_or("");
        if self.failing_paths.contains(path) {
            return Err(GenerationError::Upstream {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(Some(format!("# {} {}\n\nReference for {} {}.", method, path, method, path)))
    }
}

/// A throwaway project directory
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> ProjectPaths {
        ProjectPaths::new(self.dir.path())
    }

    /// Write `spec` as `openapi.json` at the project root
    pub fn write_spec(&self, spec: &Value) -> PathBuf {
        let path = self.dir.path().join("openapi.json");
        std::fs::write(&path, serde_json::to_string_pretty(spec).unwrap()).unwrap();
        path
    }
}

/// Every file under `dir`, keyed by relative `/` path
pub fn read_tree(dir: &Path) -> BTreeMap<String, String> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e
                .path()
                .strip_prefix(dir)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (relative, std::fs::read_to_string(e.path()).unwrap())
        })
        .collect()
}
