use folio_service::{build_router, config::Config, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Folio service...");

    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    if config.ai.api_key.is_none() {
        tracing::warn!("No AI API key configured; /api/enhance will answer 503");
    }
    if config.pdf.endpoint.is_empty() {
        tracing::warn!("No PDF conversion endpoint configured; exports will use the fallback PDF");
    }

    let state = AppState::from_config(config.clone())?;
    tracing::info!("Storage initialized at {}", config.storage.path.display());

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Folio service listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - POST /api/enhance");
    tracing::info!("  - POST /api/enhance-batch");
    tracing::info!("  - POST /api/tag-image");
    tracing::info!("  - POST /api/generate-pdf");
    tracing::info!("  - POST /api/assemble-pdf");
    tracing::info!("  - GET  /api/photos/:workspace");
    tracing::info!("  - PUT  /api/photos/:workspace");
    tracing::info!("  - GET  /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,folio_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
