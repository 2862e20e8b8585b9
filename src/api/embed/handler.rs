// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! HTTP handlers for `POST /embed` and `POST /embed/batch`.
//!
//! Each handler is one pass: map extractor rejections, validate, run exactly
//! one inference call, shape the response. Errors become HTTP responses at
//! the `ApiError` boundary; nothing here can crash the process.

use crate::api::embed::{BatchEmbedRequest, BatchEmbedResponse, EmbedRequest, EmbedResponse};
use crate::api::http_server::AppState;
use crate::api::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

/// `POST /embed` — embeds a single text.
pub async fn embed_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmbedRequest>, JsonRejection>,
) -> Result<Json<EmbedResponse>, ApiError> {
    // Body parse failures are part of the 500 catch-all, not the 400 path.
    let Json(request) = payload.map_err(|e| ApiError::Inference(e.body_text()))?;
    let text = request.validate()?;

    let embedding = state
        .embedder
        .encode(text)
        .await
        .map_err(|e| ApiError::Inference(e.to_string()))?;

    Ok(Json(EmbedResponse::new(embedding)))
}

/// `POST /embed/batch` — embeds a batch of texts in one inference call.
pub async fn embed_batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchEmbedRequest>, JsonRejection>,
) -> Result<Json<BatchEmbedResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Inference(e.body_text()))?;
    let texts = request.validate()?;

    let embeddings = state
        .embedder
        .encode_batch(&texts)
        .await
        .map_err(|e| ApiError::Inference(e.to_string()))?;

    Ok(Json(BatchEmbedResponse::new(embeddings)))
}
