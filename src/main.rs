use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use echogate::application::services::{CompletionWaiter, TranscriptionService};
use echogate::infrastructure::observability::{TracingConfig, init_tracing};
use echogate::infrastructure::providers::ProviderFactory;
use echogate::infrastructure::staging::TempDirStager;
use echogate::presentation::{AppState, create_router};
use echogate::presentation::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(
        TracingConfig {
            environment: settings.environment.to_string(),
            json_format: settings.logging.json_format,
        },
        settings.server.port,
    );

    let providers = ProviderFactory::build(&settings);
    if providers.is_empty() {
        tracing::warn!("No transcription providers configured; every request will be rejected");
    }

    let stager = Arc::new(TempDirStager::new(settings.staging.dir.clone())?);
    let waiter = CompletionWaiter::new(
        Duration::from_secs(settings.wait.poll_interval_secs),
        Duration::from_secs(settings.wait.max_wait_secs),
    );

    let transcription_service = Arc::new(TranscriptionService::new(providers, stager, waiter));

    let state = AppState {
        transcription_service,
    };

    let router = create_router(state);

    let host: std::net::IpAddr = settings.server.host.parse()?;
    let addr = SocketAddr::from((host, settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
