use std::io;

use async_trait::async_trait;

use crate::domain::{AudioPayload, StagedAudio, StagingMode};

/// Prepares an audio payload in the form a provider's call requires and
/// guarantees the staged resource is released once the request is done.
#[async_trait]
pub trait PayloadStager: Send + Sync {
    async fn stage(
        &self,
        payload: &AudioPayload,
        mode: StagingMode,
    ) -> Result<StagedAudio, StagingError>;

    async fn release(&self, staged: StagedAudio) -> Result<(), StagingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("failed to write staged payload: {0}")]
    WriteFailed(String),
    #[error("failed to remove staged payload: {0}")]
    CleanupFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
