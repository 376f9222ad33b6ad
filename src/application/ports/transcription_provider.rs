use async_trait::async_trait;

use crate::domain::{JobState, StagedAudio, StagingMode, TranscriptionJob, TranscriptionResult};

/// What a submission produced: a terminal result right away (synchronous
/// providers) or a pending provider-side job to be polled (polling providers).
#[derive(Debug)]
pub enum SubmitOutcome {
    Immediate(TranscriptionResult),
    Pending(TranscriptionJob),
}

/// An opaque remote transcription capability.
///
/// Both provider protocols are reached through this one contract: a
/// synchronous provider answers every `submit` with `Immediate`, a polling
/// provider answers with `Pending` and is then driven through `job_state`.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// The form this provider needs its audio input staged in.
    fn staging_mode(&self) -> StagingMode;

    async fn submit(&self, staged: &StagedAudio) -> Result<SubmitOutcome, TranscriptionError>;

    /// Query the remote state of a job this provider returned as `Pending`.
    async fn job_state(&self, job: &TranscriptionJob) -> Result<JobState, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("payload upload failed: {0}")]
    UploadFailed(String),
    #[error("job submission failed: {0}")]
    SubmitFailed(String),
    #[error("status poll failed: {0}")]
    PollFailed(String),
    #[error("provider has no pending jobs: {0}")]
    NoPendingJobs(String),
}
