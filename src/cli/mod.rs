//! Command-line interface argument parsing and dispatch

pub mod handlers;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ProjectPaths;
use crate::error::AppResult;

/// Lumen Docs - generate and publish API documentation from OpenAPI specs
#[derive(Parser, Debug)]
#[command(
    name = "lumen-docs",
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Project root containing the `lumen-docs/` directory
    #[arg(short, long, global = true, default_value = ".", env = "LUMEN_DOCS_PROJECT")]
    pub project: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the project directory and a default configuration
    Init,

    /// Generate documentation from an OpenAPI specification
    Generate(GenerateArgs),

    /// Upload the current documentation to the publishing host
    Deploy,

    /// Read or change configuration values
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Turn on an integration
    Enable(EnableArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to the specification, relative to --project; searched for in the project when omitted
    #[arg(short, long, value_name = "PATH")]
    pub spec: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a dotted configuration key, e.g. `openai.model gpt-4o`
    Set {
        key: String,
        value: String,
    },
    /// Print the configuration
    Show,
}

/// Arguments for the enable command
#[derive(Parser, Debug)]
pub struct EnableArgs {
    /// Integration to enable
    #[arg(value_enum)]
    pub service: Service,

    /// GitBook space receiving the documentation
    #[arg(long, value_name = "ID")]
    pub space_id: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    Gitbook,
}

impl Cli {
    /// Tracing filter directive for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "lumen_docs=debug"
        } else {
            "lumen_docs=info"
        }
    }
}

/// Run the selected command
pub async fn run(cli: Cli) -> AppResult<()> {
    let paths = ProjectPaths::new(&cli.project);

    match cli.command {
        Commands::Init => handlers::init(&paths),
        Commands::Generate(args) => handlers::generate(&cli.project, &paths, args.spec).await,
        Commands::Deploy => handlers::deploy(&paths).await,
        Commands::Config(ConfigCommand::Set { key, value }) => {
            handlers::config_set(&paths, &key, &value)
        }
        Commands::Config(ConfigCommand::Show) => handlers::config_show(&paths),
        Commands::Enable(args) => match args.service {
            Service::Gitbook => handlers::enable_gitbook(&paths, args.space_id),
        },
    }
}
