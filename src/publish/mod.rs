//! Publishing of the current documentation tree

pub mod archive;
pub mod gitbook;

use tracing::{info, warn};

use crate::config::{Config, ProjectPaths};
use crate::error::{AppError, AppResult};

pub use archive::archive_directory;
pub use gitbook::GitBookClient;

/// Zip the current tree and import it into the configured GitBook space
///
/// The archive is removed afterwards whether or not the upload succeeded.
pub async fn deploy(config: &Config, paths: &ProjectPaths, client: reqwest::Client) -> AppResult<()> {
    if !config.gitbook.enabled {
        return Err(AppError::Config(
            "GitBook deployment is not enabled; run `lumen-docs enable gitbook`".to_string(),
        ));
    }
    let space_id = config
        .gitbook
        .space_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Config("GitBook space id is not configured".to_string()))?;
    let gitbook = GitBookClient::new(client, config)?;

    let docs = paths.current_docs();
    if !docs.is_dir() {
        return Err(AppError::Publish(format!(
            "No documentation found at {}; run `lumen-docs generate` first",
            docs.display()
        )));
    }

    let archive_path = paths.archive_file();
    let result = async {
        let files = archive_directory(&docs, &archive_path)?;
        info!(files, archive = %archive_path.display(), "Documentation archived");
        let bytes = std::fs::read(&archive_path).map_err(|e| AppError::io(&archive_path, e))?;
        gitbook.import_archive(space_id, bytes).await
    }
    .await;

    if let Err(e) = std::fs::remove_file(&archive_path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(archive = %archive_path.display(), error = %e, "Failed to remove archive");
        }
    }
    result
}
