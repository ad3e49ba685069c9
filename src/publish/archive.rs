//! Zip packaging of a documentation tree

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppError, AppResult};

/// Pack every file under `source` into a zip archive at `destination`
///
/// Entry names are relative to `source` and use `/` separators. Entries are
/// added in file-name order so the same tree always yields the same archive.
/// Returns the number of files archived.
pub fn archive_directory(source: &Path, destination: &Path) -> AppResult<usize> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
    }
    let file = File::create(destination).map_err(|e| AppError::io(destination, e))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    let mut buffer = Vec::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| AppError::Publish(format!("Cannot walk {}: {}", source.display(), e)))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| AppError::Publish(e.to_string()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        buffer.clear();
        File::open(entry.path())
            .and_then(|mut f| f.read_to_end(&mut buffer))
            .map_err(|e| AppError::io(entry.path(), e))?;

        writer.start_file(name.as_str(), options).map_err(zip_error)?;
        writer
            .write_all(&buffer)
            .map_err(|e| AppError::io(destination, e))?;
        debug!(entry = %name, bytes = buffer.len(), "Archived file");
        count += 1;
    }

    writer.finish().map_err(zip_error)?;
    Ok(count)
}

fn zip_error(e: zip::result::ZipError) -> AppError {
    AppError::Publish(format!("Failed to build archive: {}", e))
}
