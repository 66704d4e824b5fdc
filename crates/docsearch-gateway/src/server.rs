//! HTTP server implementation using Axum.

use axum::{
    Router,
    routing::{get, post},
};
use docsearch_core::ChatProvider;
use docsearch_core::config::{DocSearchConfig, SearchConfig};
use docsearch_knowledge::DocumentStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;

/// Shared state for the gateway server.
pub struct AppState {
    /// Document store, shared with any other front end in the process.
    pub store: Arc<DocumentStore>,
    /// Chat backend used by `/chat`.
    pub provider: Arc<dyn ChatProvider>,
    pub search: SearchConfig,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let shared = Arc::new(state);

    Router::new()
        .route("/health", get(routes::health_check).fallback(routes::not_found))
        .route("/search", post(routes::search).fallback(routes::not_found))
        .route("/chat", post(routes::chat).fallback(routes::not_found))
        .fallback(routes::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Start the HTTP server and run until the listener fails.
pub async fn start(config: &DocSearchConfig, store: Arc<DocumentStore>) -> anyhow::Result<()> {
    let provider: Arc<dyn ChatProvider> =
        Arc::from(docsearch_providers::create_provider(&config.llm));

    let state = AppState {
        store,
        provider,
        search: config.search.clone(),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 Server running at http://{}", addr);
    tracing::info!("📍 Endpoints:");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  POST /search - Keyword document search");
    tracing::info!("  POST /chat   - Chat with document context (OpenAI-compatible)");
    tracing::info!(
        "⚙️  API key: {}",
        if config.llm.has_api_key() {
            "set"
        } else {
            "not set (using placeholder)"
        }
    );
    tracing::info!("⚙️  Base URL: {} (model {})", config.llm.base_url, config.llm.model);

    axum::serve(listener, app).await?;
    Ok(())
}
