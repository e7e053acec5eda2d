// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-process fallback index
//!
//! Documents live in an insertion-ordered vector for the lifetime of the
//! process. Queries do a linear cosine scan; the stable sort keeps
//! equal-score results in insertion order.

use async_trait::async_trait;
use std::cmp::Ordering;
use tokio::sync::RwLock;

use super::backend::VectorIndex;
use super::types::{Document, IndexError, QueryResult};
use crate::embeddings::{cosine_similarity, EMBEDDING_DIMENSION};

/// Append-ordered in-memory document store with linear-scan search
#[derive(Debug, Default)]
pub struct LocalIndex {
    documents: RwLock<Vec<Document>>,
}

impl LocalIndex {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Look up a document by id
    pub async fn get(&self, id: &str) -> Option<Document> {
        self.documents
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    fn validate(document: &Document) -> Result<(), IndexError> {
        if document.embedding.len() != EMBEDDING_DIMENSION {
            return Err(IndexError::input(format!(
                "Invalid vector dimensions: expected {}, got {}",
                EMBEDDING_DIMENSION,
                document.embedding.len()
            )));
        }
        if document
            .embedding
            .iter()
            .any(|v| v.is_nan() || v.is_infinite())
        {
            return Err(IndexError::input(
                "Invalid vector values: contains NaN or Infinity",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for LocalIndex {
    async fn upsert(&self, document: Document) -> Result<(), IndexError> {
        Self::validate(&document)?;

        let mut documents = self.documents.write().await;
        // Replace in place so the original insertion position survives
        if let Some(existing) = documents.iter_mut().find(|d| d.id == document.id) {
            *existing = document;
        } else {
            documents.push(document);
        }
        Ok(())
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<QueryResult>, IndexError> {
        if vector.len() != EMBEDDING_DIMENSION {
            return Err(IndexError::input(format!(
                "Invalid query dimensions: expected {}, got {}",
                EMBEDDING_DIMENSION,
                vector.len()
            )));
        }

        let documents = self.documents.read().await;
        let mut results: Vec<QueryResult> = documents
            .iter()
            .map(|document| QueryResult {
                doc_id: document.id.clone(),
                score: cosine_similarity(vector, &document.embedding),
                text: document.text.clone(),
                metadata: document.metadata.clone(),
            })
            .collect();

        // Stable sort: ties keep insertion order
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top_k);

        Ok(results)
    }

    async fn count(&self) -> Result<usize, IndexError> {
        Ok(self.len().await)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
