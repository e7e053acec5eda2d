// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end RAG pipeline: embed the query, retrieve context, generate
//! an answer, and report where the answer came from.

use std::sync::Arc;
use tracing::{debug, info};

use super::types::{Answer, HealthReport, RagError};
use crate::embeddings::EmbeddingProvider;
use crate::generation::GenerationRouter;
use crate::index::{DocumentMetadata, IndexRouter, IndexStats};

/// Documents retrieved per query unless the caller overrides it
pub const DEFAULT_TOP_K: usize = 3;

/// Owner recorded for requests that do not name a user
pub const DEFAULT_USER_ID: &str = "default_user";

/// Composes the index and generation routers into the query/answer
/// surface the API exposes. All failover happens inside the routers;
/// this layer only sequences the pipeline.
pub struct RagOrchestrator {
    embeddings: Arc<dyn EmbeddingProvider>,
    index: IndexRouter,
    generation: GenerationRouter,
}

impl RagOrchestrator {
    pub fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        index: IndexRouter,
        generation: GenerationRouter,
    ) -> Self {
        Self {
            embeddings,
            index,
            generation,
        }
    }

    /// Answer a query from the knowledge base.
    ///
    /// Retrieval failures on the fallback path surface as errors, but
    /// generation never fails: with no usable context the responder
    /// still produces an answer, so `sources` may be empty while
    /// `response` never is.
    pub async fn answer(
        &self,
        query: &str,
        user_id: &str,
        top_k: usize,
    ) -> Result<Answer, RagError> {
        debug!("Processing query for user {}", user_id);

        let vector = self.embeddings.embed(query).await?;
        let results = self.index.query(&vector, top_k).await?;
        debug!("Retrieved {} documents for query", results.len());

        let context = results
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let response = self.generation.generate(query, &context).await;

        // One source per retrieved document, in rank order
        let sources = results
            .into_iter()
            .map(|r| r.metadata.source.unwrap_or_else(|| "Unknown".to_string()))
            .collect();

        Ok(Answer { response, sources })
    }

    /// Store a piece of knowledge and return its content-addressed id
    pub async fn add_knowledge(
        &self,
        content: &str,
        metadata: DocumentMetadata,
        owner_id: &str,
    ) -> Result<String, RagError> {
        let id = self.index.upsert(content, metadata, owner_id).await?;
        info!("Knowledge document stored: {}", id);
        Ok(id)
    }

    /// Probe both routers and fold the results into one report
    pub async fn health(&self) -> HealthReport {
        let (llm_healthy, index_healthy) =
            tokio::join!(self.generation.health(), self.index.health());
        HealthReport::from_states(llm_healthy, index_healthy)
    }

    /// Stats for the index backend currently serving queries
    pub async fn stats(&self) -> IndexStats {
        self.index.stats().await
    }
}
