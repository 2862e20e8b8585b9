// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedder tests against the real all-MiniLM-L6-v2 model.
//!
//! All tests here require the model files downloaded by
//! `scripts/download_embedding_model.sh` and are `#[ignore]`d so the default
//! test run stays model-free.

use embedding_gateway::embeddings::OnnxEmbedder;

const MODEL_PATH: &str = "./models/all-MiniLM-L6-v2-onnx/model.onnx";
const TOKENIZER_PATH: &str = "./models/all-MiniLM-L6-v2-onnx/tokenizer.json";

async fn load_embedder() -> OnnxEmbedder {
    OnnxEmbedder::new("all-MiniLM-L6-v2", MODEL_PATH, TOKENIZER_PATH)
        .await
        .expect("Failed to load embedding model")
}

#[tokio::test]
#[ignore] // Requires downloaded model files
async fn test_model_reports_384_dimensions() {
    let embedder = load_embedder().await;
    assert_eq!(embedder.model_name(), "all-MiniLM-L6-v2");
    assert_eq!(embedder.dimensions(), 384);
}

#[tokio::test]
#[ignore] // Requires downloaded model files
async fn test_encode_returns_fixed_length_vector() {
    let embedder = load_embedder().await;

    let embedding = embedder.encode("hello world").await.unwrap();
    assert_eq!(embedding.len(), 384);
    assert!(embedding.iter().all(|v| v.is_finite()));
}

#[tokio::test]
#[ignore] // Requires downloaded model files
async fn test_encode_batch_preserves_count_and_order() {
    let embedder = load_embedder().await;

    let texts = vec![
        "the cat sat on the mat".to_string(),
        "quantum field theory".to_string(),
        "a recipe for sourdough bread".to_string(),
    ];
    let embeddings = embedder.encode_batch(&texts).await.unwrap();

    assert_eq!(embeddings.len(), 3);
    for embedding in &embeddings {
        assert_eq!(embedding.len(), 384);
    }

    // Batch results must line up with their inputs: each batch vector should
    // match the single-encode vector of the same text far more closely than
    // any other input's vector does.
    for (i, text) in texts.iter().enumerate() {
        let single = embedder.encode(text).await.unwrap();
        let own = cosine(&embeddings[i], &single);
        assert!(own > 0.99, "embeddings[{}] does not match its input: {}", i, own);
    }
}

#[tokio::test]
#[ignore] // Requires downloaded model files
async fn test_encode_is_deterministic() {
    let embedder = load_embedder().await;

    let first = embedder.encode("determinism check").await.unwrap();
    let second = embedder.encode("determinism check").await.unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert!((a - b).abs() < 1e-6, "vectors differ: {} vs {}", a, b);
    }
}

#[tokio::test]
#[ignore] // Requires downloaded model files
async fn test_missing_model_file_fails_fast() {
    let result = OnnxEmbedder::new(
        "all-MiniLM-L6-v2",
        "./models/does-not-exist/model.onnx",
        TOKENIZER_PATH,
    )
    .await;

    assert!(result.is_err());
    let message = format!("{}", result.unwrap_err());
    assert!(message.contains("not found"), "unexpected error: {}", message);
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (na * nb).max(1e-9)
}
