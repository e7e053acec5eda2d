// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for the in-process linear-scan index

use jarvis_rag_node::embeddings::EMBEDDING_DIMENSION;
use jarvis_rag_node::index::{
    content_id, Document, DocumentMetadata, IndexError, LocalIndex, VectorIndex,
};
use std::sync::Arc;

/// Unit vector along one embedding axis
fn axis_vector(index: usize) -> Vec<f32> {
    let mut v = vec![0.0; EMBEDDING_DIMENSION];
    v[index] = 1.0;
    v
}

/// Unit contributions along two axes, for mid-range similarities
fn blend_vector(first: usize, second: usize) -> Vec<f32> {
    let mut v = vec![0.0; EMBEDDING_DIMENSION];
    v[first] = 1.0;
    v[second] = 1.0;
    v
}

fn document(text: &str, embedding: Vec<f32>, source: Option<&str>) -> Document {
    Document {
        id: content_id(text),
        text: text.to_string(),
        embedding,
        owner_id: "default_user".to_string(),
        metadata: match source {
            Some(s) => DocumentMetadata::with_source(s),
            None => DocumentMetadata::default(),
        },
    }
}

#[tokio::test]
async fn test_upsert_and_count() {
    let index = LocalIndex::new();
    assert!(index.is_empty().await);

    index
        .upsert(document("first", axis_vector(0), None))
        .await
        .unwrap();
    index
        .upsert(document("second", axis_vector(1), None))
        .await
        .unwrap();

    assert_eq!(index.len().await, 2);
    assert_eq!(index.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_upsert_same_text_replaces() {
    let index = LocalIndex::new();

    index
        .upsert(document("same text", axis_vector(0), Some("draft")))
        .await
        .unwrap();
    index
        .upsert(document("same text", axis_vector(0), Some("final")))
        .await
        .unwrap();

    assert_eq!(index.len().await, 1);
    let stored = index.get(&content_id("same text")).await.unwrap();
    assert_eq!(stored.metadata.source.as_deref(), Some("final"));
}

#[tokio::test]
async fn test_replacement_preserves_insertion_position() {
    let index = LocalIndex::new();
    let shared = axis_vector(0);

    index
        .upsert(document("alpha", shared.clone(), Some("v1")))
        .await
        .unwrap();
    index
        .upsert(document("beta", shared.clone(), None))
        .await
        .unwrap();

    // Replace the first document; with tied scores it must still rank first
    index
        .upsert(document("alpha", shared.clone(), Some("v2")))
        .await
        .unwrap();

    let results = index.query(&shared, 10).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].doc_id, content_id("alpha"));
    assert_eq!(results[0].metadata.source.as_deref(), Some("v2"));
    assert_eq!(results[1].doc_id, content_id("beta"));
}

#[tokio::test]
async fn test_query_ranks_by_similarity() {
    let index = LocalIndex::new();

    // Insert in an order that differs from the expected ranking
    index
        .upsert(document("orthogonal", axis_vector(1), None))
        .await
        .unwrap();
    index
        .upsert(document("partial", blend_vector(0, 1), None))
        .await
        .unwrap();
    index
        .upsert(document("exact", axis_vector(0), None))
        .await
        .unwrap();

    let results = index.query(&axis_vector(0), 10).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].doc_id, content_id("exact"));
    assert_eq!(results[1].doc_id, content_id("partial"));
    assert_eq!(results[2].doc_id, content_id("orthogonal"));

    assert!((results[0].score - 1.0).abs() < 1e-6);
    assert!((results[1].score - 1.0 / 2f32.sqrt()).abs() < 1e-6);
    assert_eq!(results[2].score, 0.0);
}

#[tokio::test]
async fn test_query_top_k_bound() {
    let index = LocalIndex::new();
    for i in 0..3 {
        index
            .upsert(document(&format!("doc {}", i), axis_vector(i), None))
            .await
            .unwrap();
    }

    assert_eq!(index.query(&axis_vector(0), 2).await.unwrap().len(), 2);
    assert_eq!(index.query(&axis_vector(0), 10).await.unwrap().len(), 3);
    assert!(index.query(&axis_vector(0), 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_zero_query_vector_scores_zero() {
    let index = LocalIndex::new();
    index
        .upsert(document("first", axis_vector(0), None))
        .await
        .unwrap();
    index
        .upsert(document("second", axis_vector(1), None))
        .await
        .unwrap();

    let zero = vec![0.0; EMBEDDING_DIMENSION];
    let results = index.query(&zero, 10).await.unwrap();

    // Every score collapses to 0.0, so insertion order survives the sort
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score == 0.0));
    assert_eq!(results[0].doc_id, content_id("first"));
    assert_eq!(results[1].doc_id, content_id("second"));
}

#[tokio::test]
async fn test_tied_scores_keep_insertion_order() {
    let index = LocalIndex::new();
    let shared = axis_vector(3);

    for text in ["one", "two", "three"] {
        index
            .upsert(document(text, shared.clone(), None))
            .await
            .unwrap();
    }

    let results = index.query(&shared, 10).await.unwrap();
    let ids: Vec<String> = results.into_iter().map(|r| r.doc_id).collect();
    let expected: Vec<String> = ["one", "two", "three"].iter().map(|t| content_id(t)).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_rejects_wrong_dimensions() {
    let index = LocalIndex::new();

    let result = index
        .upsert(document("short vector", vec![0.1; 256], None))
        .await;
    assert!(matches!(result, Err(IndexError::Input { .. })));
    assert!(result.unwrap_err().to_string().contains("384"));
    assert!(index.is_empty().await);

    let result = index.query(&[0.1; 256], 3).await;
    assert!(matches!(result, Err(IndexError::Input { .. })));
}

#[tokio::test]
async fn test_rejects_non_finite_values() {
    let index = LocalIndex::new();

    let mut embedding = axis_vector(0);
    embedding[5] = f32::NAN;
    let result = index.upsert(document("has nan", embedding, None)).await;
    assert!(matches!(result, Err(IndexError::Input { .. })));

    let mut embedding = axis_vector(0);
    embedding[5] = f32::INFINITY;
    let result = index.upsert(document("has inf", embedding, None)).await;
    assert!(matches!(result, Err(IndexError::Input { .. })));

    assert!(index.is_empty().await);
}

#[tokio::test]
async fn test_concurrent_upserts() {
    let index = Arc::new(LocalIndex::new());

    let tasks: Vec<_> = (0..10)
        .map(|i| {
            let index = index.clone();
            tokio::spawn(async move {
                index
                    .upsert(document(&format!("concurrent doc {}", i), axis_vector(i), None))
                    .await
            })
        })
        .collect();

    for task in futures::future::join_all(tasks).await {
        task.unwrap().unwrap();
    }

    assert_eq!(index.len().await, 10);
}
