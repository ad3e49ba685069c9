//! Configuration management for Lumen Docs
//!
//! Configuration is stored as a JSON document inside the project's
//! `lumen-docs/` directory. Secrets are never written to that file; they are
//! loaded from environment variables (optionally via `.env`).

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Name of the directory that holds everything Lumen Docs owns in a project
pub const PROJECT_DIR_NAME: &str = "lumen-docs";
/// Configuration file name inside the project directory
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Snapshots, per-version trees and history live under this directory
pub const VERSIONS_DIR_NAME: &str = "versions";
/// Transient archive written by `deploy`
pub const ARCHIVE_FILE_NAME: &str = "docs.zip";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory (relative to `lumen-docs/`) receiving the current tree
    pub output_dir: String,
    /// Text generation backend settings
    pub openai: OpenAIConfig,
    /// Documentation host settings
    pub gitbook: GitBookConfig,
    /// Version history settings
    pub versions: VersionsConfig,
}

/// Settings for the OpenAI-compatible text generation backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OpenAIConfig {
    /// API base URL
    pub api_url: String,
    /// Model used for every completion
    pub model: String,
    /// Sampling temperature for endpoint pages
    pub temperature: f32,
    /// Writing tone requested from the model
    pub tone: String,
    /// Maximum output tokens per kind of request
    pub limits: TokenLimits,
    /// API key (environment only)
    #[serde(skip)]
    pub api_key: Option<String>,
}

/// Maximum completion length for each kind of generation request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenLimits {
    pub category: u32,
    pub title: u32,
    pub overview: u32,
    pub endpoint: u32,
    pub introduction: u32,
}

/// Settings for publishing to GitBook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GitBookConfig {
    /// Whether `deploy` is allowed
    pub enabled: bool,
    /// API base URL
    pub api_url: String,
    /// Target space
    pub space_id: Option<String>,
    /// API key (environment only)
    #[serde(skip)]
    pub api_key: Option<String>,
}

/// Settings for the per-version history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VersionsConfig {
    /// Write `versions/docs/v<N>` copies of every tree
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: "docs".to_string(),
            openai: OpenAIConfig::default(),
            gitbook: GitBookConfig::default(),
            versions: VersionsConfig::default(),
        }
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.2,
            tone: "formal".to_string(),
            limits: TokenLimits::default(),
            api_key: None,
        }
    }
}

impl Default for TokenLimits {
    fn default() -> Self {
        Self {
            category: 10,
            title: 50,
            overview: 500,
            endpoint: 1000,
            introduction: 500,
        }
    }
}

impl Default for GitBookConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: "https://api.gitbook.com/v1".to_string(),
            space_id: None,
            api_key: None,
        }
    }
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load the project configuration and overlay environment secrets
    ///
    /// A missing configuration file yields the defaults.
    pub fn load(paths: &ProjectPaths) -> AppResult<Self> {
        let mut config = Self::read_file(&paths.config_file())?;
        config.apply_env();
        Ok(config)
    }

    /// Read the configuration document without consulting the environment
    pub fn read_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would point generated output at project state
    ///
    /// The current tree is deleted and recreated on every run, so
    /// `output_dir` must be a plain relative path inside `lumen-docs/` that
    /// does not overlap the version history, the config file or the archive.
    pub fn validate(&self) -> AppResult<()> {
        let output_dir = Path::new(&self.output_dir);
        let invalid = |reason: &str| {
            Err(AppError::Config(format!(
                "output_dir {:?} {}",
                self.output_dir, reason
            )))
        };

        if self.output_dir.trim().is_empty() {
            return invalid("must not be empty");
        }
        if output_dir.is_absolute() {
            return invalid("must be relative to the lumen-docs directory");
        }
        if !output_dir
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return invalid("must not contain `.`, `..` or a root");
        }
        let first = output_dir.components().next().map(|c| c.as_os_str());
        if [VERSIONS_DIR_NAME, CONFIG_FILE_NAME, ARCHIVE_FILE_NAME]
            .iter()
            .any(|reserved| first == Some(std::ffi::OsStr::new(reserved)))
        {
            return invalid("collides with a file Lumen Docs manages");
        }
        Ok(())
    }

    /// Write the configuration document (secrets excluded)
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| AppError::io(path, e))
    }

    /// Overlay secrets and overrides from environment variables
    pub fn apply_env(&mut self) {
        if let Some(key) = non_empty_var("LUMEN_DOCS_OPENAI_API_KEY")
            .or_else(|| non_empty_var("OPENAI_API_KEY"))
        {
            self.openai.api_key = Some(key);
        }
        if let Some(url) = non_empty_var("LUMEN_DOCS_OPENAI_API_URL") {
            self.openai.api_url = url;
        }
        if let Some(key) = non_empty_var("LUMEN_DOCS_GITBOOK_API_KEY") {
            self.gitbook.api_key = Some(key);
        }
        if let Some(space) = non_empty_var("LUMEN_DOCS_GITBOOK_SPACE_ID") {
            self.gitbook.space_id = Some(space);
        }
    }

    /// Update one dotted key (e.g. `openai.model`) and return the new config
    ///
    /// The value is parsed as JSON when possible and stored as a plain string
    /// otherwise, so `123` can still be set on a string key. The key must
    /// already exist in the document.
    pub fn with_key(&self, key: &str, raw_value: &str) -> AppResult<Self> {
        match serde_json::from_str::<Value>(raw_value) {
            Ok(value) if !value.is_string() => self
                .with_value(key, value)
                .or_else(|_| self.with_value(key, Value::String(raw_value.to_string()))),
            _ => self.with_value(key, Value::String(raw_value.to_string())),
        }
    }

    fn with_value(&self, key: &str, value: Value) -> AppResult<Self> {
        let mut document = serde_json::to_value(self)?;
        let mut slot = &mut document;
        for part in key.split('.') {
            slot = slot
                .as_object_mut()
                .and_then(|object| object.get_mut(part))
                .ok_or_else(|| AppError::Config(format!("Unknown configuration key: {}", key)))?;
        }
        if slot.is_object() {
            return Err(AppError::Config(format!(
                "{} is a section; set one of its keys instead",
                key
            )));
        }
        *slot = value;

        let mut updated: Config = serde_json::from_value(document)
            .map_err(|e| AppError::Config(format!("Invalid value for {}: {}", key, e)))?;
        updated.validate()?;
        updated.openai.api_key = self.openai.api_key.clone();
        updated.gitbook.api_key = self.gitbook.api_key.clone();
        Ok(updated)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Filesystem locations of one Lumen Docs project
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
    output_dir: String,
}

impl ProjectPaths {
    /// Paths for the project rooted at `project_root`
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            root: project_root.into().join(PROJECT_DIR_NAME),
            output_dir: Config::default().output_dir,
        }
    }

    /// Use the output directory named by `config`
    pub fn with_output_dir(mut self, config: &Config) -> Self {
        self.output_dir = config.output_dir.clone();
        self
    }

    /// The `lumen-docs/` directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Current documentation tree
    pub fn current_docs(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.root.join(VERSIONS_DIR_NAME)
    }

    /// Specification snapshots
    pub fn spec_snapshots(&self) -> PathBuf {
        self.versions_dir().join("specs")
    }

    /// Per-version documentation trees
    pub fn versioned_docs(&self) -> PathBuf {
        self.versions_dir().join("docs")
    }

    pub fn versioned_docs_for(&self, version: u32) -> PathBuf {
        self.versioned_docs().join(format!("v{}", version))
    }

    /// Version-history side file
    pub fn history_file(&self) -> PathBuf {
        self.versions_dir().join("history.json")
    }

    /// Transient archive used by `deploy`
    pub fn archive_file(&self) -> PathBuf {
        self.root.join(ARCHIVE_FILE_NAME)
    }
}
