//! Staged placement of rendered trees on disk
//!
//! A tree is written into a hidden sibling directory first and renamed over
//! its destination only once every file is on disk, so readers never see a
//! half-written tree and nothing from a previous run survives.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::tree::RenderedTree;
use crate::error::{AppError, AppResult};

/// Write `tree` so that `destination` contains exactly its pages
pub fn write_tree(tree: &RenderedTree, destination: &Path) -> AppResult<()> {
    let staging = staging_dir(destination);
    remove_dir_if_exists(&staging)?;
    fs::create_dir_all(&staging).map_err(|e| AppError::io(&staging, e))?;

    for page in tree.pages() {
        let target = page
            .path
            .split('/')
            .fold(staging.clone(), |acc, segment| acc.join(segment));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
        fs::write(&target, &page.contents).map_err(|e| AppError::io(&target, e))?;
        debug!(path = %page.path, "Wrote page");
    }

    remove_dir_if_exists(destination)?;
    fs::rename(&staging, destination).map_err(|e| AppError::io(destination, e))?;

    info!(pages = tree.len(), destination = %destination.display(), "Documentation tree written");
    Ok(())
}

fn staging_dir(destination: &Path) -> PathBuf {
    let name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "docs".to_string());
    destination.with_file_name(format!(".{}.staging", name))
}

fn remove_dir_if_exists(path: &Path) -> AppResult<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::io(path, e)),
    }
}
