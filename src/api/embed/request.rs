// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Request types for the embedding endpoints.
//!
//! Validation happens here so the handlers stay a straight line from request
//! to inference to response. The error messages are part of the service
//! contract and must not drift.

use crate::api::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /embed`.
///
/// `text` is optional at the serde level so a missing or `null` field reaches
/// `validate()` and produces the contract's 400 instead of a deserialization
/// failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl EmbedRequest {
    /// Returns the text to embed, or the contract's 400 error when the field
    /// is missing, null, or empty.
    pub fn validate(&self) -> Result<&str, ApiError> {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ApiError::InvalidInput("Text is required".to_string())),
        }
    }
}

/// Request body for `POST /embed/batch`.
///
/// `texts` is carried as a raw JSON value so a scalar or `null` yields the
/// contract's 400 rather than an extractor-level rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEmbedRequest {
    #[serde(default)]
    pub texts: Option<Value>,
}

impl BatchEmbedRequest {
    /// Returns the texts to embed in input order.
    ///
    /// Rejects a missing field, a non-array value, an empty array, and
    /// non-string elements, all with the contract's batch error message.
    pub fn validate(&self) -> Result<Vec<String>, ApiError> {
        let required = || ApiError::InvalidInput("texts array is required".to_string());

        let values = self
            .texts
            .as_ref()
            .and_then(Value::as_array)
            .ok_or_else(required)?;

        if values.is_empty() {
            return Err(required());
        }

        values
            .iter()
            .map(|value| value.as_str().map(str::to_string).ok_or_else(required))
            .collect()
    }
}
