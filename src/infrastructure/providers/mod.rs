mod assemblyai_provider;
mod provider_factory;
mod whisper_provider;

pub use assemblyai_provider::AssemblyAiProvider;
pub use provider_factory::ProviderFactory;
pub use whisper_provider::WhisperProvider;

use bytes::Bytes;

use crate::application::ports::TranscriptionError;
use crate::domain::StagedAudio;

/// Read the staged payload back as bytes for the outgoing provider call.
pub(crate) async fn staged_bytes(staged: &StagedAudio) -> Result<Bytes, TranscriptionError> {
    match staged {
        StagedAudio::Memory { data, .. } => Ok(data.clone()),
        StagedAudio::File { path, .. } => tokio::fs::read(path)
            .await
            .map(Bytes::from)
            .map_err(|e| TranscriptionError::UploadFailed(format!("read staged file: {}", e))),
    }
}
