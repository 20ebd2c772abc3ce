//! Chat widget server backed by a chat completion API
//!
//! Hosts the widget page and runs the widget's event loop server-side, so the
//! API credential never reaches the browser.

mod api;
mod config;
mod conversation;
mod llm;
mod panel;
mod runtime;
mod state_machine;
mod system_prompt;

use api::presentation::{BrowserPresentation, SharedView};
use api::{create_router, AppState};
use config::WidgetConfig;
use conversation::ConversationStore;
use llm::{LoggingService, OpenAIService};
use runtime::{spawn_widget, ServiceLlmClient};
use state_machine::WidgetContext;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waychat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = WidgetConfig::from_env()?;
    tracing::info!(config = ?config, "Configuration loaded");

    // Completion client
    let service = OpenAIService::new(&config.api_key, &config.model, &config.endpoint)?;
    let service = Arc::new(LoggingService::new(Arc::new(service)));
    let llm_client = ServiceLlmClient::new(service);

    // Widget
    let view = SharedView::new();
    let (widget, widget_task) = spawn_widget(
        WidgetContext::new(config.history_mode),
        ConversationStore::new(config.system_prompt.clone()),
        BrowserPresentation::new(view.clone()),
        llm_client,
    );

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let app = create_router(AppState::new(widget.clone(), view, shutdown_rx))
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("waychat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Open SSE streams would otherwise keep the drain waiting
            let _ = shutdown_tx.send(true);
        })
        .await?;

    // Stop the widget; in-flight completions are discarded
    if widget.shutdown().await.is_ok() {
        widget_task.await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
