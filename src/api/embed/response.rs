// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response types for the embedding endpoints.

use serde::{Deserialize, Serialize};

/// Response body for `POST /embed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub embedding: Vec<f32>,
    pub dimensions: usize,
}

impl EmbedResponse {
    pub fn new(embedding: Vec<f32>) -> Self {
        let dimensions = embedding.len();
        Self {
            embedding,
            dimensions,
        }
    }
}

/// Response body for `POST /embed/batch`.
///
/// `embeddings[i]` corresponds to the i-th input text. `dimensions` is the
/// length of the first vector; every vector from one model handle has the
/// same length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEmbedResponse {
    pub embeddings: Vec<Vec<f32>>,
    pub count: usize,
    pub dimensions: usize,
}

impl BatchEmbedResponse {
    pub fn new(embeddings: Vec<Vec<f32>>) -> Self {
        let count = embeddings.len();
        let dimensions = embeddings.first().map(Vec::len).unwrap_or(0);
        Self {
            embeddings,
            count,
            dimensions,
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub dimensions: usize,
}
