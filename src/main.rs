// Main entry point - Dependency injection and server setup
use std::sync::Arc;

use fridge_dashboard::application::chart_service::ChartService;
use fridge_dashboard::infrastructure::config::load_dashboard_config;
use fridge_dashboard::infrastructure::memory_backend::InMemoryChartBackend;
use fridge_dashboard::presentation::app_state::AppState;
use fridge_dashboard::presentation::build_router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fridge_dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    tracing::info!(
        address = %config.server.bind_address(),
        time_format = %config.labels.time_format,
        "Configuration loaded"
    );

    // Chart backend (infrastructure layer)
    let backend = Arc::new(InMemoryChartBackend::new());

    // Chart service (application layer)
    let chart_service = ChartService::new(
        backend.clone(),
        config.labels.formatter()?,
        config.axes,
    );

    let state = Arc::new(AppState::new(
        chart_service,
        backend,
        config.thresholds.into(),
    ));

    // Router (presentation layer)
    let router = build_router(state);

    let addr = config.server.bind_address();
    tracing::info!(address = %addr, "Starting fridge-dashboard service");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
