use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::application::ports::TranscriptionProvider;
use crate::domain::{JobState, TranscriptionJob, TranscriptionResult};

use super::transcription_service::TranscribeError;

/// Drives a pending provider job to a terminal state.
///
/// Polls at a fixed interval under an overall deadline; a poll that fails at
/// the transport level is retried at the next tick only, so a persistently
/// unreachable provider exhausts the deadline and surfaces as a timeout.
pub struct CompletionWaiter {
    poll_interval: Duration,
    max_wait: Duration,
}

impl CompletionWaiter {
    pub fn new(poll_interval: Duration, max_wait: Duration) -> Self {
        Self {
            poll_interval,
            max_wait,
        }
    }

    pub async fn wait(
        &self,
        provider: &dyn TranscriptionProvider,
        job: &TranscriptionJob,
        cancel: &CancellationToken,
    ) -> Result<TranscriptionResult, TranscribeError> {
        let deadline = Instant::now() + self.max_wait;
        let mut polls: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                tracing::info!(job_id = %job.id, polls, "Wait cancelled before completion");
                return Err(TranscribeError::Cancelled);
            }

            polls += 1;
            match provider.job_state(job).await {
                Ok(JobState::Completed { text }) => {
                    tracing::info!(job_id = %job.id, polls, chars = text.len(), "Job completed");
                    return Ok(TranscriptionResult::Completed { text });
                }
                Ok(JobState::Errored { detail }) => {
                    tracing::warn!(job_id = %job.id, polls, detail = %detail, "Job errored");
                    return Ok(TranscriptionResult::Failed { detail });
                }
                Ok(state) => {
                    tracing::debug!(job_id = %job.id, state = %state, polls, "Job still pending");
                }
                Err(e) => {
                    tracing::warn!(job_id = %job.id, error = %e, "Status poll failed; retrying at next interval");
                }
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::warn!(job_id = %job.id, polls, "Gave up waiting for job completion");
                return Err(TranscribeError::Timeout(self.max_wait));
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(job_id = %job.id, polls, "Wait cancelled during poll interval");
                    return Err(TranscribeError::Cancelled);
                }
                _ = tokio::time::sleep(remaining.min(self.poll_interval)) => {}
            }
        }
    }
}
