// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding provider trait and the deterministic hash-based implementation

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::EMBEDDING_DIMENSION;

/// Errors that can occur while embedding text
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Input text is empty or whitespace-only
    #[error("Embedding input is empty")]
    EmptyInput,
}

/// Trait for turning text into a fixed-length vector
///
/// Implementations must be pure and stable: identical input text yields an
/// identical vector across calls, or indexed and query vectors stop being
/// comparable.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text into a vector of `dimension()` floats
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Dimension of the produced vectors
    fn dimension(&self) -> usize;

    /// Model name for logging
    fn model_name(&self) -> &'static str;
}

/// Deterministic embedding provider backed by a SHA-256 digest
///
/// The digest bytes are cycled over the output dimension and mapped into
/// [-1, 1]. Not a semantic model, but pure, stable and dependency-free,
/// which is what the retrieval layer needs from its opaque embedding
/// function.
pub struct HashEmbeddingProvider {
    dimension: usize,
}

impl HashEmbeddingProvider {
    pub fn new() -> Self {
        Self {
            dimension: EMBEDDING_DIMENSION,
        }
    }
}

impl Default for HashEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = hasher.finalize();

        let mut embedding = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            let byte_value = hash[i % hash.len()];
            // Convert byte to float in range [-1, 1]
            let float_value = (byte_value as f32 / 255.0) * 2.0 - 1.0;
            embedding.push(float_value);
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &'static str {
        "hash-sha256"
    }
}
