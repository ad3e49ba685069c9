//! Immutable specification snapshots, numbered sequentially
//!
//! Snapshots live in `versions/specs/openapi-v<N>.json`. The next version is
//! always `max(existing) + 1`; gaps are never filled. Allocation is not
//! reserved atomically, so only one generation run may target a project at a
//! time.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::config::ProjectPaths;
use crate::error::{AppError, AppResult};
use crate::spec::Specification;

static SNAPSHOT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^openapi-v(\d+)\.json$").unwrap());

/// One entry of the version-history side file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    /// Hex SHA-256 of the persisted snapshot
    pub spec_sha256: String,
    /// Operations new or changed since the previous version
    pub changed: usize,
    /// Documentation pages written
    pub pages: usize,
}

/// Persists and retrieves specification snapshots
#[derive(Debug, Clone)]
pub struct SpecStore {
    dir: PathBuf,
    history_file: PathBuf,
}

impl SpecStore {
    pub fn new(paths: &ProjectPaths) -> Self {
        Self {
            dir: paths.spec_snapshots(),
            history_file: paths.history_file(),
        }
    }

    /// File holding the snapshot for `version`
    pub fn snapshot_path(&self, version: u32) -> PathBuf {
        self.dir.join(format!("openapi-v{}.json", version))
    }

    /// `max + 1` over persisted snapshots, `1` when there are none
    pub fn next_version_number(&self) -> AppResult<u32> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(1),
            Err(e) => return Err(AppError::io(&self.dir, e)),
        };

        let mut latest = 0u32;
        for entry in entries {
            let entry = entry.map_err(|e| AppError::io(&self.dir, e))?;
            let name = entry.file_name();
            let Some(captures) = name.to_str().and_then(|n| SNAPSHOT_NAME.captures(n)) else {
                continue;
            };
            if let Ok(version) = captures[1].parse::<u32>() {
                latest = latest.max(version);
            }
        }

        debug!(latest, "Scanned specification snapshots");
        Ok(latest + 1)
    }

    /// Persist `spec` as the snapshot for `version`
    ///
    /// Re-saving identical content is a no-op; a differing snapshot under the
    /// same version is a `Persistence` error. Returns the snapshot digest.
    pub fn save(&self, spec: &Specification, version: u32) -> AppResult<String> {
        let content = serde_json::to_string_pretty(spec.as_value())?;
        let sha = digest(&content);
        let path = self.snapshot_path(version);

        match fs::read_to_string(&path) {
            Ok(existing) if digest(&existing) == sha => {
                debug!(version, "Snapshot already persisted with identical content");
                return Ok(sha);
            }
            Ok(_) => {
                return Err(AppError::Persistence(format!(
                    "snapshot v{} already exists with different content",
                    version
                )));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(AppError::io(&path, e)),
        }

        fs::create_dir_all(&self.dir).map_err(|e| AppError::io(&self.dir, e))?;
        write_atomically(&path, &content)?;

        info!(version, path = %path.display(), "Saved specification snapshot");
        Ok(sha)
    }

    /// Snapshot for `version`, or `None` when it does not exist
    ///
    /// An unreadable or corrupt snapshot is logged and treated as absent, so
    /// the caller documents everything.
    pub fn load(&self, version: u32) -> AppResult<Option<Specification>> {
        if version == 0 {
            return Ok(None);
        }
        let path = self.snapshot_path(version);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::io(&path, e)),
        };

        match Specification::from_json_str(&raw) {
            Ok(spec) => Ok(Some(spec)),
            Err(e) => {
                warn!(version, error = %e, "Ignoring unreadable specification snapshot");
                Ok(None)
            }
        }
    }

    /// Recorded history, oldest first
    pub fn history(&self) -> AppResult<Vec<VersionRecord>> {
        match fs::read_to_string(&self.history_file) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AppError::io(&self.history_file, e)),
        }
    }

    /// Add or replace the history entry for `record.version`
    pub fn record_history(&self, record: VersionRecord) -> AppResult<()> {
        let mut history = self.history()?;
        history.retain(|existing| existing.version != record.version);
        history.push(record);
        history.sort_by_key(|r| r.version);

        if let Some(parent) = self.history_file.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
        let content = serde_json::to_string_pretty(&history)?;
        write_atomically(&self.history_file, &content)
    }
}

/// Hex SHA-256 of `content`
pub fn digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

fn write_atomically(path: &Path, content: &str) -> AppResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = path.with_file_name(format!(".{}.tmp", file_name));
    fs::write(&staging, content).map_err(|e| AppError::io(&staging, e))?;
    fs::rename(&staging, path).map_err(|e| AppError::io(path, e))
}
