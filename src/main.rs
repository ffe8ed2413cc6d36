use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use transcription_api::application::ports::MediaFetcher;
use transcription_api::application::services::{JobSlot, preload_models};
use transcription_api::infrastructure::backend::TranscriptionBackendFactory;
use transcription_api::infrastructure::media::HttpMediaFetcher;
use transcription_api::infrastructure::observability::init_tracing;
use transcription_api::infrastructure::supervisor::ShutdownSafeguard;
use transcription_api::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&settings.tracing_config(environment));

    let transcription = &settings.transcription;
    let fetcher: Arc<dyn MediaFetcher> = Arc::new(HttpMediaFetcher::new(
        transcription.download_timeout(),
        transcription.max_media_bytes(),
    )?);
    let backend = TranscriptionBackendFactory::create(&transcription.backend_config(), fetcher);

    preload_models(
        backend.as_ref(),
        &transcription.models()?,
        transcription.device()?,
    )
    .await
    .context("model preload failed")?;

    if settings.supervisor.enabled {
        ShutdownSafeguard::new(
            std::time::Duration::from_secs(settings.supervisor.timeout_secs),
            settings.supervisor.command.clone(),
        )
        .spawn();
    }

    let job_slot = Arc::new(JobSlot::new(backend, settings.job_slot_policy()));
    let router = create_router(AppState::new(Arc::clone(&job_slot)));

    let host: std::net::IpAddr = settings
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host: {}", settings.server.host))?;
    let addr = SocketAddr::new(host, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Waiting for the in-flight job before exit");
    job_slot.wait_for_current().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
