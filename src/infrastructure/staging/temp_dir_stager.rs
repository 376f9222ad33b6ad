use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::{PayloadStager, StagingError};
use crate::domain::{AudioPayload, StagedAudio, StagingMode};

/// Stages payloads under a scoped directory.
///
/// File names derive from a per-request UUID, so concurrent requests can
/// never collide on a staged path.
pub struct TempDirStager {
    base_dir: PathBuf,
}

impl TempDirStager {
    pub fn new(base_dir: PathBuf) -> Result<Self, StagingError> {
        std::fs::create_dir_all(&base_dir).map_err(StagingError::Io)?;
        Ok(Self { base_dir })
    }
}

#[async_trait]
impl PayloadStager for TempDirStager {
    async fn stage(
        &self,
        payload: &AudioPayload,
        mode: StagingMode,
    ) -> Result<StagedAudio, StagingError> {
        match mode {
            StagingMode::InMemory => Ok(StagedAudio::Memory {
                data: payload.data().clone(),
                content_type: payload.content_type().to_string(),
            }),
            StagingMode::FileBacked => {
                let path = self.base_dir.join(format!("{}.audio", Uuid::new_v4()));
                tokio::fs::write(&path, payload.data())
                    .await
                    .map_err(|e| StagingError::WriteFailed(format!("{}: {}", path.display(), e)))?;

                tracing::debug!(
                    path = %path.display(),
                    bytes = payload.len(),
                    "Staged audio payload to disk"
                );

                Ok(StagedAudio::File {
                    path,
                    content_type: payload.content_type().to_string(),
                })
            }
        }
    }

    async fn release(&self, staged: StagedAudio) -> Result<(), StagingError> {
        match staged {
            StagedAudio::Memory { .. } => Ok(()),
            StagedAudio::File { path, .. } => {
                tokio::fs::remove_file(&path).await.map_err(|e| {
                    StagingError::CleanupFailed(format!("{}: {}", path.display(), e))
                })?;
                tracing::debug!(path = %path.display(), "Released staged audio payload");
                Ok(())
            }
        }
    }
}
