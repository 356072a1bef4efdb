//! ZIP archive extraction.
//!
//! An archive at `<dir>/<name>.zip` is unpacked into `<dir>/extract_<name>`.
//! Existing files at the destination are overwritten.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, warn};
use zip::ZipArchive;

use tally_core::defaults::EXTRACT_DIR_PREFIX;
use tally_core::{Error, Result};

/// Directory an archive is unpacked into: a sibling named after the archive's
/// stem with the `extract_` prefix.
pub fn extraction_dir_for(archive_path: &Path) -> PathBuf {
    let parent = archive_path.parent().unwrap_or_else(|| Path::new("."));
    let stem = archive_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    parent.join(format!("{}{}", EXTRACT_DIR_PREFIX, stem))
}

/// Unpack `archive_path` and return the extraction directory.
///
/// Runs on the blocking pool. Corrupt or unreadable archives, and failures
/// to create or write the destination, surface as [`Error::Extraction`].
pub async fn extract(archive_path: &Path) -> Result<PathBuf> {
    let path = archive_path.to_path_buf();
    tokio::task::spawn_blocking(move || extract_blocking(&path))
        .await
        .map_err(|e| Error::Internal(format!("Extraction task failed: {}", e)))?
}

fn extract_blocking(archive_path: &Path) -> Result<PathBuf> {
    let start = Instant::now();
    let dest = extraction_dir_for(archive_path);

    fs::create_dir_all(&dest).map_err(|e| {
        Error::Extraction(format!(
            "Failed to create extraction directory {}: {}",
            dest.display(),
            e
        ))
    })?;

    let file = File::open(archive_path).map_err(|e| {
        Error::Extraction(format!(
            "Failed to open archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| {
        Error::Extraction(format!(
            "Invalid archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    let mut written = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| Error::Extraction(format!("Failed to read entry {}: {}", i, e)))?;

        // Entries that would land outside `dest` (absolute, `..`) are dropped.
        let Some(relative) = entry.enclosed_name() else {
            warn!(
                subsystem = "intake",
                component = "archive",
                entry = entry.name(),
                "Skipping archive entry with unsafe path"
            );
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| write_error(&out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
        }
        let mut out = File::create(&out_path).map_err(|e| write_error(&out_path, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| {
            Error::Extraction(format!(
                "Failed to unpack {} from {}: {}",
                out_path.display(),
                archive_path.display(),
                e
            ))
        })?;
        written += 1;
    }

    debug!(
        subsystem = "intake",
        component = "archive",
        op = "extract",
        path = %dest.display(),
        entry_count = written,
        duration_ms = start.elapsed().as_millis() as u64,
        "Archive extracted"
    );

    Ok(dest)
}

fn write_error(path: &Path, e: io::Error) -> Error {
    Error::Extraction(format!("Failed to write {}: {}", path.display(), e))
}
