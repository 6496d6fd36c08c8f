//! Staging area for raw uploads
//!
//! Raw upload bytes are written to disk before extraction is attempted, so a
//! crash mid-pipeline never loses the original document and every analyzed
//! upload leaves an audit trail.

use crate::error::IngestError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes raw uploads into a directory, keyed by original filename.
///
/// Concurrent uploads with identical filenames are not deduplicated or
/// disambiguated: the last writer wins. Accepted race.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    /// Create a staging area rooted at `dir`.
    ///
    /// The directory is not created here; call
    /// [`ensure_exists`](StagingArea::ensure_exists) once at startup.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The staging directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the staging directory (and parents) if missing
    pub async fn ensure_exists(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Durably write `bytes` under the staging directory as `filename`.
    ///
    /// Returns the path of the written file.
    pub async fn stage(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, IngestError> {
        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| IngestError::Staging {
                filename: filename.to_string(),
                source,
            })?;

        debug!("Staged {} bytes at {}", bytes.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_stage_writes_bytes() {
        let tmp = TempDir::new().unwrap();
        let staging = StagingArea::new(tmp.path());

        let path = staging.stage("contract.pdf", b"%PDF-1.5 content").await.unwrap();

        assert_eq!(path, tmp.path().join("contract.pdf"));
        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, b"%PDF-1.5 content");
    }

    #[tokio::test]
    async fn test_same_filename_last_writer_wins() {
        let tmp = TempDir::new().unwrap();
        let staging = StagingArea::new(tmp.path());

        staging.stage("contract.pdf", b"first").await.unwrap();
        staging.stage("contract.pdf", b"second").await.unwrap();

        let written = std::fs::read(tmp.path().join("contract.pdf")).unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn test_missing_directory_is_a_staging_error() {
        let tmp = TempDir::new().unwrap();
        let staging = StagingArea::new(tmp.path().join("does-not-exist"));

        let result = staging.stage("contract.pdf", b"bytes").await;
        assert!(matches!(result, Err(IngestError::Staging { .. })));
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let staging = StagingArea::new(tmp.path().join("nested/uploads"));

        staging.ensure_exists().await.unwrap();
        assert!(staging.dir().is_dir());

        staging.stage("contract.pdf", b"bytes").await.unwrap();
    }
}
