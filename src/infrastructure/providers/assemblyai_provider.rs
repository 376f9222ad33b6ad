use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{SubmitOutcome, TranscriptionError, TranscriptionProvider};
use crate::domain::{JobState, ProviderSelector, StagedAudio, StagingMode, TranscriptionJob};

use super::staged_bytes;

/// Polling provider backed by the AssemblyAI v2 API: the payload is uploaded
/// for a content reference, a transcript job is created against that
/// reference, and the job is then polled until terminal.
pub struct AssemblyAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AssemblyAiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn upload(&self, staged: &StagedAudio) -> Result<String, TranscriptionError> {
        let data = staged_bytes(staged).await?;

        tracing::debug!(bytes = data.len(), "Uploading audio to AssemblyAI");

        let response = self
            .client
            .post(format!("{}/v2/upload", self.base_url))
            .header("authorization", &self.api_key)
            .header("content-type", "application/octet-stream")
            .body(data)
            .send()
            .await
            .map_err(|e| TranscriptionError::UploadFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::UploadFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::UploadFailed(format!("parse response: {}", e)))?;

        Ok(uploaded.upload_url)
    }

    async fn create_job(&self, audio_url: &str) -> Result<String, TranscriptionError> {
        let response = self
            .client
            .post(format!("{}/v2/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&json!({ "audio_url": audio_url }))
            .send()
            .await
            .map_err(|e| TranscriptionError::SubmitFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::SubmitFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let created: CreateTranscriptResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::SubmitFailed(format!("parse response: {}", e)))?;

        Ok(created.id)
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Deserialize)]
struct CreateTranscriptResponse {
    id: String,
}

#[derive(Deserialize)]
struct TranscriptStatusResponse {
    status: String,
    text: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl TranscriptionProvider for AssemblyAiProvider {
    fn staging_mode(&self) -> StagingMode {
        StagingMode::InMemory
    }

    async fn submit(&self, staged: &StagedAudio) -> Result<SubmitOutcome, TranscriptionError> {
        let audio_url = self.upload(staged).await?;
        let job_id = self.create_job(&audio_url).await?;

        tracing::info!(job_id = %job_id, "AssemblyAI transcript job created");

        Ok(SubmitOutcome::Pending(TranscriptionJob::new(
            job_id,
            ProviderSelector::AssemblyAi,
        )))
    }

    async fn job_state(&self, job: &TranscriptionJob) -> Result<JobState, TranscriptionError> {
        let response = self
            .client
            .get(format!("{}/v2/transcript/{}", self.base_url, job.id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::PollFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::PollFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript: TranscriptStatusResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::PollFailed(format!("parse response: {}", e)))?;

        match transcript.status.as_str() {
            "queued" => Ok(JobState::Submitted),
            "processing" => Ok(JobState::Processing),
            "completed" => Ok(JobState::Completed {
                text: transcript.text.unwrap_or_default(),
            }),
            "error" => Ok(JobState::Errored {
                detail: transcript
                    .error
                    .unwrap_or_else(|| "unknown provider error".to_string()),
            }),
            other => Err(TranscriptionError::PollFailed(format!(
                "unexpected transcript status: {}",
                other
            ))),
        }
    }
}
