// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text embedding support
//!
//! Queries and documents are compared in a shared 384-dimensional vector
//! space. The provider trait keeps the embedding function swappable; the
//! shipped implementation is fully deterministic so indexed and query
//! vectors stay comparable across restarts.

pub mod provider;

pub use provider::{EmbeddingError, EmbeddingProvider, HashEmbeddingProvider};

/// Embedding dimension, fixed per deployment (all-MiniLM-L6-v2 convention)
pub const EMBEDDING_DIMENSION: usize = 384;

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched dimensions or when either vector has zero
/// magnitude, so callers never divide by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        0.0
    } else {
        dot_product / (magnitude_a * magnitude_b)
    }
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
