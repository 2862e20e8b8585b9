// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod embeddings;

pub use api::{create_app, start_server, ApiError, AppState};
pub use config::GatewayConfig;
pub use embeddings::OnnxEmbedder;
