use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use uuid::Uuid;

use echogate::application::ports::{SubmitOutcome, TranscriptionError, TranscriptionProvider};
use echogate::application::services::{CompletionWaiter, TranscriptionService};
use echogate::domain::{
    JobState, ProviderSelector, StagedAudio, StagingMode, TranscriptionJob, TranscriptionResult,
};
use echogate::infrastructure::staging::TempDirStager;
use echogate::presentation::{AppState, create_router};

const BOUNDARY: &str = "test-boundary";

struct ImmediateProvider {
    text: &'static str,
}

#[async_trait::async_trait]
impl TranscriptionProvider for ImmediateProvider {
    fn staging_mode(&self) -> StagingMode {
        StagingMode::FileBacked
    }

    async fn submit(&self, _staged: &StagedAudio) -> Result<SubmitOutcome, TranscriptionError> {
        Ok(SubmitOutcome::Immediate(TranscriptionResult::Completed {
            text: self.text.to_string(),
        }))
    }

    async fn job_state(&self, job: &TranscriptionJob) -> Result<JobState, TranscriptionError> {
        Err(TranscriptionError::NoPendingJobs(job.id.clone()))
    }
}

struct FailingSubmitProvider;

#[async_trait::async_trait]
impl TranscriptionProvider for FailingSubmitProvider {
    fn staging_mode(&self) -> StagingMode {
        StagingMode::FileBacked
    }

    async fn submit(&self, _staged: &StagedAudio) -> Result<SubmitOutcome, TranscriptionError> {
        Err(TranscriptionError::UploadFailed("connection refused".to_string()))
    }

    async fn job_state(&self, job: &TranscriptionJob) -> Result<JobState, TranscriptionError> {
        Err(TranscriptionError::NoPendingJobs(job.id.clone()))
    }
}

struct PollingMockProvider {
    polls_before_terminal: u32,
    terminal: JobState,
    polls: Arc<AtomicU32>,
}

#[async_trait::async_trait]
impl TranscriptionProvider for PollingMockProvider {
    fn staging_mode(&self) -> StagingMode {
        StagingMode::InMemory
    }

    async fn submit(&self, _staged: &StagedAudio) -> Result<SubmitOutcome, TranscriptionError> {
        Ok(SubmitOutcome::Pending(TranscriptionJob::new(
            "job-1",
            ProviderSelector::AssemblyAi,
        )))
    }

    async fn job_state(&self, _job: &TranscriptionJob) -> Result<JobState, TranscriptionError> {
        let polls = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if polls >= self.polls_before_terminal {
            Ok(self.terminal.clone())
        } else {
            Ok(JobState::Processing)
        }
    }
}

fn unique_staging_dir() -> PathBuf {
    std::env::temp_dir().join(format!("echogate-api-test-{}", Uuid::new_v4()))
}

fn test_app(
    providers: HashMap<ProviderSelector, Arc<dyn TranscriptionProvider>>,
    staging_dir: &Path,
) -> axum::Router {
    let stager = Arc::new(TempDirStager::new(staging_dir.to_path_buf()).unwrap());
    let waiter = CompletionWaiter::new(Duration::from_millis(10), Duration::from_millis(200));
    let transcription_service = Arc::new(TranscriptionService::new(providers, stager, waiter));

    create_router(AppState {
        transcription_service,
    })
}

fn single_provider_app(
    selector: ProviderSelector,
    provider: Arc<dyn TranscriptionProvider>,
    staging_dir: &Path,
) -> axum::Router {
    let mut providers: HashMap<ProviderSelector, Arc<dyn TranscriptionProvider>> = HashMap::new();
    providers.insert(selector, provider);
    test_app(providers, staging_dir)
}

fn audio_upload_request(uri: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"audio\"; filename=\"clip.wav\"\r\n\
         Content-Type: audio/wav\r\n\r\nfake audio bytes\r\n--{b}--\r\n",
        b = BOUNDARY
    );
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn empty_upload_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(format!("--{}--\r\n", BOUNDARY)))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn staged_file_count(staging_dir: &Path) -> usize {
    std::fs::read_dir(staging_dir).map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn given_running_gateway_when_health_check_then_returns_ok() {
    let app = test_app(HashMap::new(), &unique_staging_dir());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_polling_provider_completing_after_two_polls_when_uploading_then_returns_text() {
    let polls = Arc::new(AtomicU32::new(0));
    let provider = Arc::new(PollingMockProvider {
        polls_before_terminal: 2,
        terminal: JobState::Completed {
            text: "hello world".to_string(),
        },
        polls: Arc::clone(&polls),
    });
    let app = single_provider_app(ProviderSelector::AssemblyAi, provider, &unique_staging_dir());

    let response = app
        .oneshot(audio_upload_request(
            "/api/v1/transcriptions?provider=assemblyai",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["text"], "hello world");
    assert!(polls.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn given_synchronous_provider_when_uploading_then_returns_text_without_polling() {
    let staging_dir = unique_staging_dir();
    let provider = Arc::new(ImmediateProvider {
        text: "hello world",
    });
    let app = single_provider_app(ProviderSelector::Whisper, provider, &staging_dir);

    let response = app
        .oneshot(audio_upload_request(
            "/api/v1/transcriptions?provider=whisper",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["text"], "hello world");
    assert_eq!(staged_file_count(&staging_dir), 0);
}

#[tokio::test]
async fn given_provider_reporting_errored_job_when_uploading_then_returns_provider_detail() {
    let provider = Arc::new(PollingMockProvider {
        polls_before_terminal: 1,
        terminal: JobState::Errored {
            detail: "bad audio".to_string(),
        },
        polls: Arc::new(AtomicU32::new(0)),
    });
    let app = single_provider_app(ProviderSelector::AssemblyAi, provider, &unique_staging_dir());

    let response = app
        .oneshot(audio_upload_request(
            "/api/v1/transcriptions?provider=assemblyai",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "bad audio");
}

#[tokio::test]
async fn given_job_never_reaching_terminal_state_when_uploading_then_times_out() {
    let provider = Arc::new(PollingMockProvider {
        polls_before_terminal: u32::MAX,
        terminal: JobState::Processing,
        polls: Arc::new(AtomicU32::new(0)),
    });
    let app = single_provider_app(ProviderSelector::AssemblyAi, provider, &unique_staging_dir());

    let response = app
        .oneshot(audio_upload_request(
            "/api/v1/transcriptions?provider=assemblyai",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn given_no_audio_field_when_uploading_then_asks_for_a_file() {
    let provider = Arc::new(ImmediateProvider { text: "unused" });
    let app = single_provider_app(ProviderSelector::Whisper, provider, &unique_staging_dir());

    let response = app
        .oneshot(empty_upload_request(
            "/api/v1/transcriptions?provider=whisper",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Please upload a file");
}

#[tokio::test]
async fn given_unknown_provider_selector_when_uploading_then_rejects_request() {
    let app = test_app(HashMap::new(), &unique_staging_dir());

    let response = app
        .oneshot(audio_upload_request(
            "/api/v1/transcriptions?provider=carrier-pigeon",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("Unknown transcription provider")
    );
}

#[tokio::test]
async fn given_missing_provider_parameter_when_uploading_then_rejects_request() {
    let app = test_app(HashMap::new(), &unique_staging_dir());

    let response = app
        .oneshot(audio_upload_request("/api/v1/transcriptions"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required query parameter: provider");
}

#[tokio::test]
async fn given_provider_without_credentials_when_uploading_then_returns_unavailable() {
    let app = test_app(HashMap::new(), &unique_staging_dir());

    let response = app
        .oneshot(audio_upload_request(
            "/api/v1/transcriptions?provider=whisper",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn given_submit_failure_when_uploading_then_staged_file_is_still_released() {
    let staging_dir = unique_staging_dir();
    let app = single_provider_app(
        ProviderSelector::Whisper,
        Arc::new(FailingSubmitProvider),
        &staging_dir,
    );

    let response = app
        .oneshot(audio_upload_request(
            "/api/v1/transcriptions?provider=whisper",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("upload failed"));
    assert_eq!(staged_file_count(&staging_dir), 0);
}
