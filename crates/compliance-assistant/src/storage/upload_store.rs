//! Local disk storage for uploaded documents
//!
//! Files are written under the upload directory with the client filename
//! as-is. A second upload with the same name replaces the first.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Writes uploads into a single directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the on-disk location for a client filename.
    ///
    /// Names that would leave the upload directory are rejected.
    pub fn location_for(&self, filename: &str) -> Result<PathBuf> {
        let escapes = filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(['/', '\\', '\0']);
        if escapes {
            return Err(Error::InvalidFilename(filename.to_string()));
        }
        Ok(self.root.join(filename))
    }

    /// Write `data` under `filename`, creating the directory on demand
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let location = self.location_for(filename)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&location, data).await?;

        tracing::info!("Stored upload '{}' ({} bytes) at {}", filename, data.len(), location.display());
        Ok(location)
    }
}
