//! contact-gateway server entry point.
//!
//! Connects the message store, makes sure the schema exists, and serves the
//! Axum router until Ctrl+C or SIGTERM.

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use contact_gateway::api;
use contact_gateway::app_state::AppState;
use contact_gateway::config::{ContactConfig, LogFormat};
use contact_gateway::persistence::MessageStore;
use contact_gateway::service::ContactService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ContactConfig::from_env().context("invalid configuration")?;

    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting contact-gateway");

    // Build persistence layer
    let store = MessageStore::connect(&config)
        .await
        .context("failed to open message store")?;
    store
        .ensure_schema()
        .await
        .context("failed to create messages table")?;
    tracing::info!(backend = ?store.backend(), "messages table ready");

    // Build service layer and router
    let app_state = AppState::new(ContactService::new(store));
    let app = api::build_app(app_state, config.request_timeout());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::warn!("received Ctrl+C, shutting down"),
        () = terminate => tracing::warn!("received SIGTERM, shutting down"),
    }
}
