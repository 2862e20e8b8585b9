// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! HTTP API: router, endpoint handlers, and error translation.

pub mod embed;
pub mod errors;
pub mod http_server;

pub use errors::{ApiError, ErrorBody};
pub use http_server::{create_app, start_server, AppState};
