// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vector index backend trait definition

use async_trait::async_trait;

use super::types::{Document, IndexError, QueryResult};

/// Trait implemented by similarity index backends
///
/// Both the remote vector database adapter and the in-process fallback
/// index implement this trait, so the router can fail over between them
/// per call.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Store a document, replacing any existing record with the same id
    async fn upsert(&self, document: Document) -> Result<(), IndexError>;

    /// Return the top `top_k` documents ranked by cosine similarity,
    /// best first. Returns fewer results when fewer documents exist.
    async fn query(&self, vector: &[f32], top_k: usize)
        -> Result<Vec<QueryResult>, IndexError>;

    /// Number of stored vectors
    async fn count(&self) -> Result<usize, IndexError>;

    /// Backend name for logging and stats
    fn name(&self) -> &'static str;

    /// Cheap reachability check; in-process backends are always reachable
    async fn probe(&self) -> bool {
        true
    }
}
