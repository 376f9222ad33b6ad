use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    PayloadStager, StagingError, SubmitOutcome, TranscriptionError, TranscriptionProvider,
};
use crate::domain::{AudioPayload, ProviderSelector, StagedAudio, TranscriptionResult};

use super::completion_waiter::CompletionWaiter;

/// Orchestrates one transcription request: stage the payload, submit it to
/// the selected provider, wait for a terminal outcome if the provider is
/// asynchronous, and collapse every outcome into one uniform result.
///
/// The staged payload is released on every exit path, including provider
/// failure, timeout and cancellation.
pub struct TranscriptionService {
    providers: HashMap<ProviderSelector, Arc<dyn TranscriptionProvider>>,
    stager: Arc<dyn PayloadStager>,
    waiter: CompletionWaiter,
}

impl TranscriptionService {
    pub fn new(
        providers: HashMap<ProviderSelector, Arc<dyn TranscriptionProvider>>,
        stager: Arc<dyn PayloadStager>,
        waiter: CompletionWaiter,
    ) -> Self {
        Self {
            providers,
            stager,
            waiter,
        }
    }

    pub async fn transcribe(
        &self,
        payload: AudioPayload,
        selector: ProviderSelector,
        cancel: CancellationToken,
    ) -> Result<String, TranscribeError> {
        let provider = self
            .providers
            .get(&selector)
            .ok_or(TranscribeError::NotConfigured(selector))?;

        let staged = self
            .stager
            .stage(&payload, provider.staging_mode())
            .await
            .map_err(TranscribeError::Staging)?;

        let result = self
            .run(provider.as_ref(), selector, &staged, &cancel)
            .await;

        if let Err(e) = self.stager.release(staged).await {
            tracing::warn!(error = %e, "Failed to release staged payload");
        }

        result
    }

    async fn run(
        &self,
        provider: &dyn TranscriptionProvider,
        selector: ProviderSelector,
        staged: &StagedAudio,
        cancel: &CancellationToken,
    ) -> Result<String, TranscribeError> {
        let outcome = provider
            .submit(staged)
            .await
            .map_err(TranscribeError::Provider)?;

        let result = match outcome {
            SubmitOutcome::Immediate(result) => {
                tracing::debug!(provider = %selector, "Provider answered synchronously");
                result
            }
            SubmitOutcome::Pending(job) => {
                tracing::info!(
                    provider = %selector,
                    job_id = %job.id,
                    "Job accepted; awaiting completion"
                );
                self.waiter.wait(provider, &job, cancel).await?
            }
        };

        match result {
            TranscriptionResult::Completed { text } => Ok(text),
            TranscriptionResult::Failed { detail } => Err(TranscribeError::ProviderFailure(detail)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("transcription provider not configured: {0}")]
    NotConfigured(ProviderSelector),
    #[error("staging failed: {0}")]
    Staging(StagingError),
    #[error("{0}")]
    Provider(TranscriptionError),
    #[error("{0}")]
    ProviderFailure(String),
    #[error("transcription timed out after {0:?}")]
    Timeout(Duration),
    #[error("request cancelled by client")]
    Cancelled,
}
