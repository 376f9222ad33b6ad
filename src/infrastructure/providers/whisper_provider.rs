use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{SubmitOutcome, TranscriptionError, TranscriptionProvider};
use crate::domain::{JobState, StagedAudio, StagingMode, TranscriptionJob, TranscriptionResult};

use super::staged_bytes;

/// Synchronous provider backed by the OpenAI Whisper API: a single multipart
/// call carries the full payload and blocks until the transcript is returned.
/// There is no intermediate job state.
pub struct WhisperProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl WhisperProvider {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionProvider for WhisperProvider {
    fn staging_mode(&self) -> StagingMode {
        StagingMode::FileBacked
    }

    async fn submit(&self, staged: &StagedAudio) -> Result<SubmitOutcome, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let data = staged_bytes(staged).await?;

        let file_part = multipart::Part::bytes(data.to_vec())
            .file_name("audio.wav")
            .mime_str(staged.content_type())
            .map_err(|e| TranscriptionError::SubmitFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);

        tracing::debug!(model = %self.model, bytes = data.len(), "Sending audio to Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::SubmitFailed(format!("request: {}", e)))?;

        // A non-success status here is the provider's own failure surface for
        // an accepted call, not a transport fault.
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Ok(SubmitOutcome::Immediate(TranscriptionResult::Failed {
                detail: format!("status {}: {}", status, body),
            }));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::SubmitFailed(format!("body: {}", e)))?;

        tracing::info!(chars = transcript.len(), "Whisper transcription completed");

        Ok(SubmitOutcome::Immediate(TranscriptionResult::Completed {
            text: transcript.trim().to_string(),
        }))
    }

    async fn job_state(&self, job: &TranscriptionJob) -> Result<JobState, TranscriptionError> {
        Err(TranscriptionError::NoPendingJobs(job.id.clone()))
    }
}
