//! Per-request upload storage.
//!
//! Each upload lands in its own `<root>/<uuid-v7>/` directory, so concurrent
//! requests with the same client filename never collide. Anything created
//! next to the upload (archive extraction directories) lives in the same
//! directory and is removed with it.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use tally_core::{sanitize_filename, Result};

/// An uploaded file owned by one request.
///
/// Call [`StoredUpload::cleanup`] when the request is done. Dropping without
/// it still removes the directory, synchronously.
#[derive(Debug)]
pub struct StoredUpload {
    dir: PathBuf,
    path: PathBuf,
    cleaned: bool,
}

impl StoredUpload {
    /// Reserve a fresh request directory under `root` for a file called
    /// `original_name` (sanitized). The file itself is not created.
    pub async fn create(root: &Path, original_name: Option<&str>) -> Result<Self> {
        let original_name = original_name.unwrap_or_default();
        let dir = root.join(Uuid::now_v7().to_string());
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(sanitize_filename(original_name));

        debug!(
            subsystem = "api",
            component = "uploads",
            file_name = original_name,
            path = %path.display(),
            "Upload directory reserved"
        );

        Ok(Self {
            dir,
            path,
            cleaned: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The request-unique directory holding the upload.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Remove the request directory. Failures are logged, never returned.
    pub async fn cleanup(mut self) {
        self.cleaned = true;
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => debug!(
                subsystem = "api",
                component = "uploads",
                op = "cleanup",
                path = %self.dir.display(),
                "Upload removed"
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                subsystem = "api",
                component = "uploads",
                op = "cleanup",
                path = %self.dir.display(),
                error = %e,
                "Failed to remove upload"
            ),
        }
    }
}

impl Drop for StoredUpload {
    fn drop(&mut self) {
        if self.cleaned {
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.dir) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    subsystem = "api",
                    component = "uploads",
                    op = "cleanup",
                    path = %self.dir.display(),
                    error = %e,
                    "Failed to remove upload on drop"
                );
            }
        }
    }
}
