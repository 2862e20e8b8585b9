// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! API error types and their translation to HTTP responses.
//!
//! The service contract defines exactly two error kinds: invalid input
//! (HTTP 400) and inference failure (HTTP 500). Both are serialized as
//! `{"error": <message>}`; inference failures are additionally logged so a
//! failed request never goes unnoticed, and never takes the process down.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// JSON body returned for every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Missing, empty, or malformed required field. HTTP 400.
    InvalidInput(String),
    /// Model call or request parsing failed. HTTP 500.
    Inference(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidInput(msg) | ApiError::Inference(msg) => msg,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ApiError::Inference(msg) => write!(f, "Inference failure: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Inference(ref msg) = self {
            error!("Error generating embedding: {}", msg);
        }

        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid = ApiError::InvalidInput("Text is required".to_string());
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let inference = ApiError::Inference("model exploded".to_string());
        assert_eq!(inference.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            error: "Text is required".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Text is required"}"#);
    }

    #[tokio::test]
    async fn test_into_response_serializes_error_field() {
        let response = ApiError::InvalidInput("texts array is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "texts array is required");
    }
}
