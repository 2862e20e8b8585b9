// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! In-process sentence embedding via ONNX Runtime.

pub mod onnx_model;

pub use onnx_model::OnnxEmbedder;
