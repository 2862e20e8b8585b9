// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Runtime wrapper for the sentence-transformer model.
//!
//! Loads the model and tokenizer once at startup, probes the output
//! dimensionality with a validation inference, and exposes single and batch
//! encoding with attention-mask-weighted mean pooling.

use anyhow::{Context, Result};
use ndarray::{Array2, ArrayView2, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::Tokenizer;
use tracing::info;

/// The loaded sentence-embedding model.
///
/// Constructed once at process start and shared read-only across request
/// handlers. The ONNX session requires `&mut self` to run, so it sits behind
/// a `Mutex`; inference calls are serialized, everything else is lock-free.
#[derive(Clone)]
pub struct OnnxEmbedder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimensions: usize,
}

impl std::fmt::Debug for OnnxEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbedder")
            .field("model_name", &self.model_name)
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

/// Token ids and attention mask for one encoded text, widened to i64 for the
/// ONNX input tensors.
struct EncodedText {
    ids: Vec<i64>,
    mask: Vec<i64>,
}

impl OnnxEmbedder {
    /// Loads the model and tokenizer from disk and validates the output shape.
    ///
    /// Runs one probe inference during construction; fails if the model does
    /// not produce a `[batch, seq_len, hidden]` token-embedding tensor. The
    /// reported dimensionality is taken from the probe output (384 for
    /// all-MiniLM-L6-v2), so every embedding this handle ever returns has
    /// that exact length.
    pub async fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let mut session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))?;

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        // Probe inference: learn the hidden dimension and reject models that
        // do not emit token-level embeddings.
        let dimensions = {
            let encoded = encode_text(&tokenizer, "validation probe")?;
            let seq_len = encoded.ids.len();

            let outputs = session.run(ort::inputs![
                "input_ids" => Value::from_array(Array2::from_shape_vec((1, seq_len), encoded.ids)?)?,
                "attention_mask" => Value::from_array(Array2::from_shape_vec((1, seq_len), encoded.mask)?)?,
                "token_type_ids" => Value::from_array(Array2::from_shape_vec((1, seq_len), vec![0i64; seq_len])?)?
            ])?;

            let output = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            let shape = output.shape();
            if shape.len() != 3 {
                anyhow::bail!(
                    "Model outputs unexpected shape {:?} (expected [batch, seq_len, hidden])",
                    shape
                );
            }
            shape[2]
        };

        info!(model = %model_name, dimensions, "Embedding model loaded");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimensions,
        })
    }

    /// Encodes a single text into one fixed-length embedding vector.
    pub async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.run_inference(&[text.to_string()])?;
        vectors
            .pop()
            .context("Inference returned no embedding for input text")
    }

    /// Encodes a batch of texts in one inference call.
    ///
    /// The returned vectors are aligned by index with the input slice.
    pub async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        self.run_inference(texts)
    }

    /// Tokenizes, pads, runs the session, and mean-pools each batch item.
    fn run_inference(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let encodings: Vec<EncodedText> = texts
            .iter()
            .map(|text| encode_text(&self.tokenizer, text))
            .collect::<Result<_>>()?;

        // Pad every sequence to the longest one in the batch.
        let max_len = encodings.iter().map(|e| e.ids.len()).max().unwrap_or(0);
        let batch = texts.len();

        let mut input_ids = Vec::with_capacity(batch * max_len);
        let mut attention_mask = Vec::with_capacity(batch * max_len);
        for encoding in &encodings {
            let padding = max_len - encoding.ids.len();
            input_ids.extend_from_slice(&encoding.ids);
            input_ids.extend(std::iter::repeat(0i64).take(padding));
            attention_mask.extend_from_slice(&encoding.mask);
            attention_mask.extend(std::iter::repeat(0i64).take(padding));
        }
        let masks = attention_mask.clone();

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Embedding session lock poisoned"))?;
        let outputs = session.run(ort::inputs![
            "input_ids" => Value::from_array(Array2::from_shape_vec((batch, max_len), input_ids)?)?,
            "attention_mask" => Value::from_array(Array2::from_shape_vec((batch, max_len), attention_mask)?)?,
            "token_type_ids" => Value::from_array(Array2::from_shape_vec((batch, max_len), vec![0i64; batch * max_len])?)?
        ])?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let mut embeddings = Vec::with_capacity(batch);
        for index in 0..batch {
            let token_embeddings = output.index_axis(Axis(0), index);
            let mask = &masks[index * max_len..(index + 1) * max_len];
            let pooled = mean_pool(token_embeddings.into_dimensionality()?, mask);

            if pooled.len() != self.dimensions {
                anyhow::bail!(
                    "Unexpected embedding dimension at index {}: {} (expected {})",
                    index,
                    pooled.len(),
                    self.dimensions
                );
            }
            embeddings.push(pooled);
        }

        Ok(embeddings)
    }

    /// Output dimensionality, fixed for the lifetime of this handle.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Name of the loaded model.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

fn encode_text(tokenizer: &Tokenizer, text: &str) -> Result<EncodedText> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

    Ok(EncodedText {
        ids: encoding.get_ids().iter().map(|&id| id as i64).collect(),
        mask: encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect(),
    })
}

/// Mean pooling over the sequence dimension, weighted by the attention mask
/// so padding tokens do not contribute to the sentence vector.
fn mean_pool(token_embeddings: ArrayView2<'_, f32>, mask: &[i64]) -> Vec<f32> {
    let seq_len = token_embeddings.shape()[0];
    let hidden = token_embeddings.shape()[1];

    let mut pooled = vec![0.0f32; hidden];
    let mut mask_sum = 0.0f32;

    for i in 0..seq_len {
        let weight = mask[i] as f32;
        mask_sum += weight;
        for j in 0..hidden {
            pooled[j] += token_embeddings[[i, j]] * weight;
        }
    }

    for value in &mut pooled {
        *value /= mask_sum.max(1e-9);
    }

    pooled
}
