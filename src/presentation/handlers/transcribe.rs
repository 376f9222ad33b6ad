use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::application::services::TranscribeError;
use crate::domain::{AudioPayload, ProviderSelector};
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TranscribeParams {
    pub provider: Option<String>,
}

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub text: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accepts a multipart audio upload and returns the normalized transcript.
///
/// The service call runs in its own task under a cancellation token whose
/// guard lives in this handler: if the caller disconnects mid-wait, the token
/// cancels and the poll loop stops instead of running unbounded, while the
/// spawned task still releases any staged payload.
#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    Query(params): Query<TranscribeParams>,
    mut multipart: Multipart,
) -> Response {
    let selector = match params.provider.as_deref() {
        Some(raw) => match ProviderSelector::from_str(raw) {
            Ok(selector) => selector,
            Err(message) => {
                tracing::warn!(provider = %raw, "Rejected unknown provider selector");
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
                    .into_response();
            }
        },
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing required query parameter: provider".to_string(),
                }),
            )
                .into_response();
        }
    };

    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Transcription request with no audio file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Please upload a file".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read audio bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    if data.is_empty() {
        tracing::warn!("Transcription request with empty audio payload");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Please upload a file".to_string(),
            }),
        )
            .into_response();
    }

    tracing::debug!(
        bytes = data.len(),
        content_type = %content_type,
        provider = %selector,
        "Audio payload received"
    );

    let payload = AudioPayload::new(data, content_type);
    let cancel = CancellationToken::new();
    let _cancel_guard = cancel.clone().drop_guard();

    let service = Arc::clone(&state.transcription_service);
    let task = tokio::spawn(async move { service.transcribe(payload, selector, cancel).await });

    match task.await {
        Ok(Ok(text)) => (StatusCode::OK, Json(TranscriptResponse { text })).into_response(),
        Ok(Err(e)) => error_response(e),
        Err(e) => {
            tracing::error!(error = %e, "Transcription task aborted");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn error_response(err: TranscribeError) -> Response {
    let status = match &err {
        TranscribeError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        TranscribeError::Staging(_) => StatusCode::INTERNAL_SERVER_ERROR,
        TranscribeError::Provider(_) | TranscribeError::ProviderFailure(_) => {
            StatusCode::BAD_GATEWAY
        }
        TranscribeError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        TranscribeError::Cancelled => StatusCode::INTERNAL_SERVER_ERROR,
    };

    tracing::error!(error = %err, status = %status, "Transcription request failed");

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
