// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use embedding_gateway::{api, config::GatewayConfig, embeddings::OnnxEmbedder};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();

    tracing::info!(
        model = %config.model_name,
        model_path = %config.model_path,
        "Loading embedding model"
    );

    let embedder = OnnxEmbedder::new(
        config.model_name.clone(),
        config.model_path.clone(),
        config.tokenizer_path.clone(),
    )
    .await?;

    tracing::info!(
        "Model loaded successfully: {} ({} dimensions)",
        embedder.model_name(),
        embedder.dimensions()
    );

    api::start_server(&config, Arc::new(embedder))
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
