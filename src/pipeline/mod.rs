//! Documentation generation pipeline
//!
//! Sequences one run: load spec, claim a version, diff against the previous
//! snapshot, classify every operation, synthesize all text, write the trees,
//! persist the snapshot. Each state is entered only after the previous one's
//! side effects are complete. A failed run is not resumable; running again
//! with the same input reclaims the same version number.
//!
//! All text is generated before the first file is written, so a fatal
//! generation error (invalid API key) leaves the previous output untouched.

pub mod context;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn, Instrument};

use crate::config::{Config, ProjectPaths};
use crate::docs::{write_tree, CategoryContent, DocTreeBuilder, SynthesizedDocs};
use crate::error::AppResult;
use crate::generate::{Classifier, ContentSynthesizer};
use crate::llm::TextGenerator;
use crate::spec::{CategoryMap, OperationId, ParsedEndpoint, Specification};
use crate::versioning::{changed_operations, SpecStore, VersionRecord};

pub use context::RunContext;

/// States of one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    SpecLoaded,
    Diffed,
    Classified,
    Synthesized,
    TreeBuilt,
    VersionSaved,
    Done,
    /// Absorbing failure state
    Failed,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub run_id: String,
    pub version: u32,
    /// Operations new or changed since the previous version
    pub changed: BTreeSet<OperationId>,
    /// Documented categories in index order
    pub categories: Vec<String>,
    /// Endpoints that received a page
    pub documented: usize,
    /// Endpoints left out because their content could not be generated
    pub skipped: Vec<OperationId>,
    pub pages_written: usize,
    pub current_dir: PathBuf,
    pub version_dir: Option<PathBuf>,
}

enum SpecInput<'a> {
    File(&'a Path),
    Loaded(Specification),
}

/// Orchestrates generation runs for one project
pub struct Pipeline {
    config: Config,
    paths: ProjectPaths,
    generator: Arc<dyn TextGenerator>,
    store: SpecStore,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(config: Config, paths: ProjectPaths, generator: Arc<dyn TextGenerator>) -> Self {
        let paths = paths.with_output_dir(&config);
        let store = SpecStore::new(&paths);
        Self {
            config,
            paths,
            generator,
            store,
            state: PipelineState::Idle,
        }
    }

    /// State reached by the most recent run
    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn store(&self) -> &SpecStore {
        &self.store
    }

    /// Run the pipeline on a specification file
    pub async fn run(&mut self, spec_path: &Path) -> AppResult<GenerationReport> {
        self.drive(SpecInput::File(spec_path), &spec_path.display().to_string())
            .await
    }

    /// Run the pipeline on an already parsed specification
    pub async fn run_spec(&mut self, spec: Specification) -> AppResult<GenerationReport> {
        let label = spec.title().unwrap_or("<in-memory>").to_string();
        self.drive(SpecInput::Loaded(spec), &label).await
    }

    async fn drive(&mut self, input: SpecInput<'_>, label: &str) -> AppResult<GenerationReport> {
        self.state = PipelineState::Idle;
        let mut ctx = RunContext::new(self.generator.name());
        ctx.log_run_start(label);

        let span = ctx.create_span();
        let result = self.execute(input, &mut ctx).instrument(span).await;

        if let Err(e) = &result {
            let from = self.state;
            self.state = PipelineState::Failed;
            ctx.log_transition(from, PipelineState::Failed);
            ctx.log_error(&e.to_string());
        }
        result
    }

    fn advance(&mut self, ctx: &RunContext, next: PipelineState) {
        ctx.log_transition(self.state, next);
        self.state = next;
    }

    async fn execute(
        &mut self,
        input: SpecInput<'_>,
        ctx: &mut RunContext,
    ) -> AppResult<GenerationReport> {
        self.config.validate()?;
        let spec = match input {
            SpecInput::File(path) => Specification::load(path)?,
            SpecInput::Loaded(spec) => spec,
        };
        self.advance(ctx, PipelineState::SpecLoaded);

        let version = self.store.next_version_number()?;
        ctx.version = Some(version);
        let previous = self.store.load(version - 1)?;
        let changed = changed_operations(previous.as_ref(), &spec);
        info!(
            run_id = %ctx.run_id,
            version,
            first_run = previous.is_none(),
            changed = changed.len(),
            "Computed changed operations"
        );
        self.advance(ctx, PipelineState::Diffed);

        let categories = self.classify(&spec).await?;
        self.advance(ctx, PipelineState::Classified);

        let (docs, skipped) = self.synthesize(&spec, &categories, ctx).await?;
        self.advance(ctx, PipelineState::Synthesized);

        let tree = DocTreeBuilder::build(&docs);
        let version_dir = if self.config.versions.enabled {
            let dir = self.paths.versioned_docs_for(version);
            write_tree(&tree, &dir)?;
            Some(dir)
        } else {
            None
        };
        let current_dir = self.paths.current_docs();
        write_tree(&tree, &current_dir)?;
        self.advance(ctx, PipelineState::TreeBuilt);

        let spec_sha256 = self.store.save(&spec, version)?;
        self.store.record_history(VersionRecord {
            version,
            created_at: Utc::now(),
            spec_sha256,
            changed: changed.len(),
            pages: tree.len(),
        })?;
        self.advance(ctx, PipelineState::VersionSaved);

        let report = GenerationReport {
            run_id: ctx.run_id.clone(),
            version,
            categories: docs.categories.iter().map(|c| c.name.clone()).collect(),
            documented: docs.endpoint_count(),
            skipped,
            pages_written: tree.len(),
            changed,
            current_dir,
            version_dir,
        };
        ctx.log_run_complete(report.pages_written, report.changed.len(), report.skipped.len());
        self.advance(ctx, PipelineState::Done);
        Ok(report)
    }

    /// Assign every operation to a category, in document order
    async fn classify(&self, spec: &Specification) -> AppResult<CategoryMap> {
        let classifier = Classifier::new(self.generator.clone(), &self.config);
        let mut categories = CategoryMap::new();

        for operation in spec.operations() {
            let category = classifier
                .classify(&operation.tags(), operation.summary(), operation.description())
                .await?;
            let title = classifier.title_for(&operation).await?;
            categories.push(category, ParsedEndpoint::from_operation(&operation, title));
        }

        info!(
            categories = categories.len(),
            endpoints = categories.endpoint_count(),
            "Classified operations"
        );
        Ok(categories)
    }

    /// Generate every page body; endpoints whose content fails are skipped
    async fn synthesize(
        &self,
        spec: &Specification,
        categories: &CategoryMap,
        ctx: &RunContext,
    ) -> AppResult<(SynthesizedDocs, Vec<OperationId>)> {
        let synthesizer = ContentSynthesizer::new(self.generator.clone(), &self.config)
            .with_api_title(spec.title());
        let mut docs = SynthesizedDocs::default();
        let mut skipped = Vec::new();

        for (name, endpoints) in categories.iter() {
            let mut pages = Vec::with_capacity(endpoints.len());
            for endpoint in endpoints {
                match synthesizer.endpoint_content(endpoint).await? {
                    Some(content) => pages.push((endpoint.clone(), content)),
                    None => {
                        let id = endpoint.id();
                        ctx.log_endpoint_skipped(&id);
                        skipped.push(id);
                    }
                }
            }

            if pages.is_empty() {
                warn!(category = %name, "No endpoint of the category could be documented, omitting it");
                continue;
            }

            let documented: Vec<ParsedEndpoint> = pages.iter().map(|(e, _)| e.clone()).collect();
            let overview = synthesizer.resource_overview(name, &documented).await?;
            docs.categories.push(CategoryContent {
                name: name.to_string(),
                overview,
                pages,
            });
        }

        docs.introduction = synthesizer.introduction().await?;
        Ok((docs, skipped))
    }
}
