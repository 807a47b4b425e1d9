//! HTTP server lifecycle

use super::{
    middleware::{create_trace_layer, request_logger},
    routes::create_router,
    AppState,
};
use axum::middleware;
use std::net::SocketAddr;
use tasksift_core::api::{AppConfig, CliError, Services};
use tokio::signal;
use tracing::info;

/// Builds state from config and serves until Ctrl+C / SIGTERM.
pub async fn handle_serve(cfg: &AppConfig, services: Services) -> Result<(), CliError> {
    let state = AppState::new(
        services,
        cfg.server.template_path.as_str(),
        &cfg.llm.api_key_env,
    )
    .map_err(|e| CliError::Server(e.to_string()))?;

    if !state.template_path.exists() {
        tracing::warn!(
            "page template {} does not exist yet; GET / will fail until it does",
            state.template_path.display()
        );
    }

    start_server(&cfg.server.host, cfg.server.port, state)
        .await
        .map_err(|e: Box<dyn std::error::Error + Send + Sync>| CliError::Server(e.to_string()))
}

pub async fn start_server(
    host: &str,
    port: u16,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let router = create_router(state);

    let app = router
        .layer(middleware::from_fn(request_logger))
        .layer(create_trace_layer());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("--- Starting TaskSift web app ---");
    info!("Open your web browser and go to http://{}/", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C signal");
                }
                _ = wait_for_sigterm() => {
                    info!("Received SIGTERM signal");
                }
            }

            info!("Starting graceful shutdown...");
        })
        .await?;

    info!("--- Server Stopped ---");
    Ok(())
}

/// Wait for SIGTERM (Unix)
#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!("failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// No SIGTERM on Windows; Ctrl+C still ends the server.
#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
