// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Failover behavior of the whole pipeline: queries keep getting answered
//! while remote backends are down, and only the health report says so.

use async_trait::async_trait;
use jarvis_rag_node::embeddings::{EmbeddingProvider, HashEmbeddingProvider};
use jarvis_rag_node::generation::{AnswerGenerator, GenerationError, GenerationRouter};
use jarvis_rag_node::index::{
    Document, DocumentMetadata, IndexError, IndexRouter, LocalIndex, QueryResult, VectorIndex,
};
use jarvis_rag_node::rag::{HealthStatus, RagOrchestrator, ServiceState, DEFAULT_TOP_K};
use serde_json::json;
use std::sync::Arc;

/// Remote index that accepted its probe but fails every call
struct FailingIndex;

#[async_trait]
impl VectorIndex for FailingIndex {
    async fn upsert(&self, _document: Document) -> Result<(), IndexError> {
        Err(IndexError::backend("upstream timeout"))
    }

    async fn query(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<QueryResult>, IndexError> {
        Err(IndexError::backend("upstream timeout"))
    }

    async fn count(&self) -> Result<usize, IndexError> {
        Err(IndexError::backend("upstream timeout"))
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// LLM that accepted its probe but fails every completion
struct FailingGenerator;

#[async_trait]
impl AnswerGenerator for FailingGenerator {
    async fn generate(&self, _query: &str, _context: &str) -> Result<String, GenerationError> {
        Err(GenerationError::backend("model crashed"))
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

/// LLM that always answers
struct SucceedingGenerator;

#[async_trait]
impl AnswerGenerator for SucceedingGenerator {
    async fn generate(&self, query: &str, _context: &str) -> Result<String, GenerationError> {
        Ok(format!("llm answer to: {}", query))
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

async fn orchestrator_with(
    remote_index: Option<Arc<dyn VectorIndex>>,
    generator: Option<Arc<dyn AnswerGenerator>>,
) -> RagOrchestrator {
    let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(HashEmbeddingProvider::new());
    let local = Arc::new(LocalIndex::new());
    let index = IndexRouter::new(embeddings.clone(), remote_index, local).await;
    let generation = GenerationRouter::new(generator).await;
    RagOrchestrator::new(embeddings, index, generation)
}

#[tokio::test]
async fn test_answers_survive_index_outage() {
    let orchestrator = orchestrator_with(Some(Arc::new(FailingIndex)), None).await;

    orchestrator
        .add_knowledge(
            "Paris is the capital of France",
            DocumentMetadata::with_source("wiki"),
            "default_user",
        )
        .await
        .unwrap();

    let answer = orchestrator
        .answer("What is the capital of France?", "default_user", DEFAULT_TOP_K)
        .await
        .unwrap();

    // The caller sees a normal answer; only the backend changed underneath
    assert_eq!(answer.sources, vec!["wiki"]);
    assert!(!answer.response.is_empty());
}

#[tokio::test]
async fn test_answers_survive_llm_outage() {
    let orchestrator = orchestrator_with(None, Some(Arc::new(FailingGenerator))).await;

    orchestrator
        .add_knowledge(
            "Paris is the capital of France",
            DocumentMetadata::with_source("wiki"),
            "default_user",
        )
        .await
        .unwrap();

    let answer = orchestrator
        .answer("What is the capital of France?", "default_user", DEFAULT_TOP_K)
        .await
        .unwrap();

    assert_eq!(answer.sources, vec!["wiki"]);
    assert!(!answer.response.is_empty());
}

#[tokio::test]
async fn test_full_outage_still_answers() {
    let orchestrator = orchestrator_with(
        Some(Arc::new(FailingIndex)),
        Some(Arc::new(FailingGenerator)),
    )
    .await;

    orchestrator
        .add_knowledge(
            "Rust has no garbage collector",
            DocumentMetadata::with_source("book"),
            "default_user",
        )
        .await
        .unwrap();

    let answer = orchestrator
        .answer("Does Rust have a garbage collector?", "default_user", DEFAULT_TOP_K)
        .await
        .unwrap();

    assert_eq!(answer.sources, vec!["book"]);
    assert!(!answer.response.is_empty());
}

#[tokio::test]
async fn test_health_degraded_when_backends_missing() {
    let orchestrator = orchestrator_with(None, None).await;
    let report = orchestrator.health().await;

    assert_eq!(report.status, HealthStatus::Degraded);
    assert_eq!(
        serde_json::to_value(report).unwrap(),
        json!({
            "status": "degraded",
            "services": {"llm": "unavailable", "index": "unavailable"}
        })
    );
}

#[tokio::test]
async fn test_health_reports_each_service_separately() {
    let orchestrator = orchestrator_with(None, Some(Arc::new(SucceedingGenerator))).await;
    let report = orchestrator.health().await;

    assert_eq!(report.status, HealthStatus::Degraded);
    assert_eq!(report.services.llm, ServiceState::Operational);
    assert_eq!(report.services.index, ServiceState::Unavailable);
}
