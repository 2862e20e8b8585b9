use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::embed::{embed_batch_handler, embed_handler, HealthResponse};
use crate::config::GatewayConfig;
use crate::embeddings::OnnxEmbedder;

/// Shared state for all request handlers: the one model handle, loaded at
/// startup and never reconstructed per request.
#[derive(Clone)]
pub struct AppState {
    pub embedder: Arc<OnnxEmbedder>,
}

/// Builds the gateway router. Split out from [`start_server`] so integration
/// tests can drive it with `tower::ServiceExt::oneshot`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/embed", post(embed_handler))
        .route("/embed/batch", post(embed_batch_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Binds the listener and serves requests until ctrl-c.
pub async fn start_server(
    config: &GatewayConfig,
    embedder: Arc<OnnxEmbedder>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(AppState { embedder });

    let addr = format!("{}:{}", config.host, config.port).parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Embedding gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model: state.embedder.model_name().to_string(),
        dimensions: state.embedder.dimensions(),
    })
}
