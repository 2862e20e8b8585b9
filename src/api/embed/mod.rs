// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding endpoints: request/response types and handlers.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{embed_batch_handler, embed_handler};
pub use request::{BatchEmbedRequest, EmbedRequest};
pub use response::{BatchEmbedResponse, EmbedResponse, HealthResponse};
