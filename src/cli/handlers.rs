//! Command handlers

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{Config, ProjectPaths};
use crate::error::{AppError, AppResult};
use crate::llm::openai::build_http_client;
use crate::llm::OpenAIClient;
use crate::pipeline::{GenerationReport, Pipeline};
use crate::publish;

const SPEC_DIRECTORIES: [&str; 3] = [".", "api", "docs"];
const SPEC_FILE_NAMES: [&str; 3] = ["openapi.json", "swagger.json", "spec.json"];

/// Look for a specification file in the usual places under `project_root`
pub fn find_spec_file(project_root: &Path) -> Option<PathBuf> {
    SPEC_DIRECTORIES
        .iter()
        .flat_map(|dir| SPEC_FILE_NAMES.iter().map(move |name| project_root.join(dir).join(name)))
        .find(|candidate| candidate.is_file())
}

/// Specification to generate from
///
/// An explicit relative path is taken relative to `project_root`; without
/// one the usual locations are searched.
pub fn resolve_spec_path(project_root: &Path, spec: Option<PathBuf>) -> AppResult<PathBuf> {
    match spec {
        Some(path) => Ok(project_root.join(path)),
        None => find_spec_file(project_root).ok_or_else(|| {
            AppError::InvalidSpec(format!(
                "No openapi.json, swagger.json or spec.json found under {}; pass --spec",
                project_root.display()
            ))
        }),
    }
}

pub fn init(paths: &ProjectPaths) -> AppResult<()> {
    let config_file = paths.config_file();
    if config_file.exists() {
        println!("Lumen Docs is already initialised in {}", paths.root().display());
        return Ok(());
    }

    let config = Config::default();
    config.save(&config_file)?;
    let paths = paths.clone().with_output_dir(&config);
    for dir in [paths.current_docs(), paths.spec_snapshots(), paths.versioned_docs()] {
        fs::create_dir_all(&dir).map_err(|e| AppError::io(&dir, e))?;
    }

    info!(root = %paths.root().display(), "Project initialised");
    println!("Created {}", config_file.display());
    println!("Set LUMEN_DOCS_OPENAI_API_KEY before running `lumen-docs generate`.");
    Ok(())
}

pub async fn generate(
    project_root: &Path,
    paths: &ProjectPaths,
    spec: Option<PathBuf>,
) -> AppResult<()> {
    let spec_path = resolve_spec_path(project_root, spec)?;
    debug!(spec = %spec_path.display(), "Using specification");

    let config = Config::load(paths)?;
    let generator = OpenAIClient::new(build_http_client()?, &config)?;
    let mut pipeline = Pipeline::new(config, paths.clone(), Arc::new(generator));

    let report = pipeline.run(&spec_path).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &GenerationReport) {
    println!(
        "Generated version {} ({} pages) in {}",
        report.version,
        report.pages_written,
        report.current_dir.display()
    );
    if let Some(dir) = &report.version_dir {
        println!("Version copy: {}", dir.display());
    }

    if report.changed.is_empty() {
        println!("No operations changed since the previous version.");
    } else {
        println!("Changed operations ({}):", report.changed.len());
        for operation in &report.changed {
            println!("  {}", operation);
        }
    }

    if !report.skipped.is_empty() {
        println!("Endpoints left out ({}):", report.skipped.len());
        for operation in &report.skipped {
            println!("  {}", operation);
        }
    }
}

pub async fn deploy(paths: &ProjectPaths) -> AppResult<()> {
    let config = Config::load(paths)?;
    let paths = paths.clone().with_output_dir(&config);
    publish::deploy(&config, &paths, build_http_client()?).await?;
    println!("Documentation deployed to GitBook.");
    Ok(())
}

pub fn config_set(paths: &ProjectPaths, key: &str, value: &str) -> AppResult<()> {
    let config_file = paths.config_file();
    let updated = Config::read_file(&config_file)?.with_key(key, value)?;
    updated.save(&config_file)?;
    println!("Set {} = {}", key, value);
    Ok(())
}

pub fn config_show(paths: &ProjectPaths) -> AppResult<()> {
    let config = Config::load(paths)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!("OpenAI API key: {}", presence(&config.openai.api_key));
    println!("GitBook API key: {}", presence(&config.gitbook.api_key));
    Ok(())
}

fn presence(secret: &Option<String>) -> &'static str {
    if secret.is_some() {
        "set"
    } else {
        "not set"
    }
}

pub fn enable_gitbook(paths: &ProjectPaths, space_id: Option<String>) -> AppResult<()> {
    let config_file = paths.config_file();
    let mut config = Config::read_file(&config_file)?;

    let space_id = space_id
        .or_else(|| config.gitbook.space_id.clone())
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Config("A GitBook space id is required (--space-id)".to_string()))?;

    config.gitbook.enabled = true;
    config.gitbook.space_id = Some(space_id.clone());
    config.save(&config_file)?;

    println!("GitBook publishing enabled for space {}", space_id);
    println!("Set LUMEN_DOCS_GITBOOK_API_KEY before running `lumen-docs deploy`.");
    Ok(())
}
