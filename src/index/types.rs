// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the similarity index

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;

use crate::embeddings::EmbeddingError;

/// Content-addressed document identifier: SHA-256 of the raw text, hex
/// encoded. Identical text always maps to the same id, which is what gives
/// upserts their natural deduplication.
pub fn content_id(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// A stored knowledge-base record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Content-addressed identifier (see [`content_id`])
    pub id: String,
    /// Raw stored text
    pub text: String,
    /// Embedding vector, fixed dimension per deployment
    pub embedding: Vec<f32>,
    /// Owner tag, defaults to the anonymous user
    pub owner_id: String,
    /// Caller-supplied metadata
    pub metadata: DocumentMetadata,
}

/// Metadata attached to a document
///
/// `source` is the one field the pipeline reasons about (it becomes the
/// citation list); everything else the caller sends is preserved in the
/// open extension map and travels with the document untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl DocumentMetadata {
    /// Metadata carrying only a source tag
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            extra: HashMap::new(),
        }
    }
}

/// A single ranked retrieval result, produced fresh per query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Identifier of the matching document
    pub doc_id: String,
    /// Cosine similarity against the query vector, nominally in [-1, 1]
    pub score: f32,
    /// Text of the matching document
    pub text: String,
    /// Metadata of the matching document
    pub metadata: DocumentMetadata,
}

/// Summary of the index backing the knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    /// Which backend the numbers describe ("remote" or "memory")
    pub backend: String,
    /// Number of stored vectors
    pub total_vectors: usize,
    /// Embedding dimension
    pub dimension: usize,
}

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum IndexError {
    /// Remote backend is missing endpoint or credentials; non-fatal, the
    /// router prefers the in-memory index until restart
    #[error("Remote index not configured: {reason}")]
    Unconfigured { reason: String },

    /// Network, timeout or protocol failure talking to a backend; triggers
    /// same-call fallback and is never surfaced to the caller
    #[error("Index backend failure: {message}")]
    Backend { message: String },

    /// Malformed caller input (wrong dimension, non-finite values);
    /// propagates without fallback
    #[error("Invalid input: {reason}")]
    Input { reason: String },

    /// Embedding the text failed; propagates without fallback
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

impl IndexError {
    pub fn backend(message: impl Into<String>) -> Self {
        IndexError::Backend {
            message: message.into(),
        }
    }

    pub fn input(reason: impl Into<String>) -> Self {
        IndexError::Input {
            reason: reason.into(),
        }
    }

    /// Whether a fallback attempt against the other backend makes sense
    pub fn is_transient(&self) -> bool {
        matches!(self, IndexError::Backend { .. })
    }
}
