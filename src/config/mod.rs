// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Gateway configuration, read from environment variables with defaults.

use std::env;

/// Runtime configuration for the embedding gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Interface to bind. Defaults to all interfaces.
    pub host: String,
    /// HTTP port. Defaults to 5001.
    pub port: u16,
    /// Model name reported by `/health`.
    pub model_name: String,
    /// Path to the ONNX model file.
    pub model_path: String,
    /// Path to the tokenizer JSON file.
    pub tokenizer_path: String,
}

impl GatewayConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// suitable for a model downloaded by `scripts/download_embedding_model.sh`.
    pub fn from_env() -> Self {
        Self {
            host: env_or("GATEWAY_HOST", "0.0.0.0"),
            port: env_or("GATEWAY_PORT", "5001").parse().unwrap_or(5001),
            model_name: env_or("EMBEDDING_MODEL_NAME", "all-MiniLM-L6-v2"),
            model_path: env_or(
                "EMBEDDING_MODEL_PATH",
                "./models/all-MiniLM-L6-v2-onnx/model.onnx",
            ),
            tokenizer_path: env_or(
                "EMBEDDING_TOKENIZER_PATH",
                "./models/all-MiniLM-L6-v2-onnx/tokenizer.json",
            ),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
