// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for the deterministic hash-based embedding provider

use jarvis_rag_node::embeddings::{
    cosine_similarity, EmbeddingError, EmbeddingProvider, HashEmbeddingProvider,
    EMBEDDING_DIMENSION,
};

#[tokio::test]
async fn test_embedding_has_configured_dimension() {
    let provider = HashEmbeddingProvider::new();
    let embedding = provider.embed("Hello world").await.unwrap();

    assert_eq!(embedding.len(), EMBEDDING_DIMENSION);
    assert_eq!(provider.dimension(), EMBEDDING_DIMENSION);
}

#[tokio::test]
async fn test_embedding_is_deterministic() {
    let provider = HashEmbeddingProvider::new();
    let first = provider.embed("Rust is a systems language").await.unwrap();
    let second = provider.embed("Rust is a systems language").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_different_texts_embed_differently() {
    let provider = HashEmbeddingProvider::new();
    let a = provider.embed("Paris is the capital of France").await.unwrap();
    let b = provider.embed("Berlin is the capital of Germany").await.unwrap();

    assert_ne!(a, b);
}

#[tokio::test]
async fn test_embedding_values_are_normalized_range() {
    let provider = HashEmbeddingProvider::new();
    let embedding = provider.embed("bounded values").await.unwrap();

    for value in embedding {
        assert!(
            (-1.0..=1.0).contains(&value),
            "embedding value {} out of range",
            value
        );
    }
}

#[tokio::test]
async fn test_empty_input_is_rejected() {
    let provider = HashEmbeddingProvider::new();

    let result = provider.embed("").await;
    assert!(matches!(result, Err(EmbeddingError::EmptyInput)));

    let result = provider.embed("   \n\t").await;
    assert!(matches!(result, Err(EmbeddingError::EmptyInput)));
}

#[tokio::test]
async fn test_identical_texts_have_maximal_similarity() {
    let provider = HashEmbeddingProvider::new();
    let a = provider.embed("the same sentence").await.unwrap();
    let b = provider.embed("the same sentence").await.unwrap();

    let score = cosine_similarity(&a, &b);
    assert!((score - 1.0).abs() < 1e-6);
}

#[test]
fn test_model_name() {
    let provider = HashEmbeddingProvider::new();
    assert_eq!(provider.model_name(), "hash-sha256");
}
