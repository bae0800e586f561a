//! Staging of uploaded content at a unique, isolated filesystem path
//!
//! Format detection needs random access to the bytes via a path, so
//! the stream is written out before the pipeline runs. The temp
//! directory is removed when the guard drops, on every exit path
//! including digest-read failures and fixity mismatches.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::error::{Error, Result};

/// A staged upload; owns its temp directory for the guard's lifetime
#[derive(Debug)]
pub struct StagedUpload {
    // held for its Drop impl
    _dir: TempDir,
    path: PathBuf,
}

impl StagedUpload {
    /// Drains `reader` into a fresh file under a fresh temp directory.
    /// The parent directory comes from the config, not from any
    /// process-wide mutable default.
    #[instrument(skip(config, reader))]
    pub async fn stage<R: AsyncRead + Unpin>(
        config: &PipelineConfig,
        reader: &mut R,
    ) -> Result<Self> {
        let dir = match &config.staging_dir {
            Some(parent) => TempDir::new_in(parent),
            None => TempDir::new(),
        }
        .map_err(Error::Staging)?;

        let path = dir.path().join(Uuid::new_v4().simple().to_string());
        let mut file = tokio::fs::File::create(&path).await.map_err(Error::Staging)?;
        let written = tokio::io::copy(reader, &mut file)
            .await
            .map_err(Error::Staging)?;
        file.flush().await.map_err(Error::Staging)?;

        debug!(path = %path.display(), bytes = written, "upload staged");
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn staged_file_holds_the_stream_bytes() {
        let config = PipelineConfig::default();
        let staged = StagedUpload::stage(&config, &mut &b"test"[..]).await.unwrap();
        let bytes = tokio::fs::read(staged.path()).await.unwrap();
        assert_eq!(bytes, b"test");
    }

    #[tokio::test]
    async fn drop_removes_the_staged_artifact() {
        let config = PipelineConfig::default();
        let staged = StagedUpload::stage(&config, &mut &b"test"[..]).await.unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn staging_dir_override_is_honored() {
        let parent = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            staging_dir: Some(parent.path().to_path_buf()),
            ..Default::default()
        };
        let staged = StagedUpload::stage(&config, &mut &b"test"[..]).await.unwrap();
        assert!(staged.path().starts_with(parent.path()));
    }

    #[tokio::test]
    async fn unwritable_staging_dir_is_a_staging_failure() {
        let config = PipelineConfig {
            staging_dir: Some(PathBuf::from("/nonexistent/premiser-staging")),
            ..Default::default()
        };
        let err = StagedUpload::stage(&config, &mut &b"test"[..])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Staging(_)));
    }
}
