// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Handler tests that drive the HTTP endpoints directly, without a
//! listening socket

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use jarvis_rag_node::api::http_server::{
    chat_handler, health_handler, knowledge_handler, root_handler, stats_handler, AppState,
};
use jarvis_rag_node::api::types::{ChatRequest, KnowledgeRequest};
use jarvis_rag_node::embeddings::{EmbeddingProvider, HashEmbeddingProvider};
use jarvis_rag_node::generation::GenerationRouter;
use jarvis_rag_node::index::{DocumentMetadata, IndexRouter, LocalIndex};
use jarvis_rag_node::rag::{HealthStatus, RagOrchestrator};
use std::sync::Arc;

/// State wired to the offline backends, as a fresh node without remote
/// services would run
async fn test_state() -> AppState {
    let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(HashEmbeddingProvider::new());
    let local = Arc::new(LocalIndex::new());
    let index = IndexRouter::new(embeddings.clone(), None, local).await;
    let generation = GenerationRouter::new(None).await;
    AppState::new(Arc::new(RagOrchestrator::new(embeddings, index, generation)))
}

#[tokio::test]
async fn test_root_returns_service_directory() {
    let response = root_handler().await.into_response();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_knowledge_then_chat_round_trip() {
    let state = test_state().await;

    let request = KnowledgeRequest {
        content: "Paris is the capital of France".to_string(),
        metadata: DocumentMetadata::with_source("wiki"),
        user_id: "default_user".to_string(),
    };
    let result = knowledge_handler(State(state.clone()), Json(request)).await;
    let Json(response) = result.expect("knowledge handler should succeed");

    assert_eq!(response.status, "success");
    assert_eq!(response.message, "Knowledge added successfully");
    assert_eq!(response.document_id.len(), 64);

    let request = ChatRequest {
        query: "What is the capital of France?".to_string(),
        user_id: "default_user".to_string(),
    };
    let result = chat_handler(State(state), Json(request)).await;
    let Json(answer) = result.expect("chat handler should succeed");

    assert_eq!(answer.sources, vec!["wiki"]);
    assert!(!answer.response.is_empty());
}

#[tokio::test]
async fn test_chat_rejects_empty_query() {
    let state = test_state().await;

    let request = ChatRequest {
        query: "   ".to_string(),
        user_id: "default_user".to_string(),
    };
    let result = chat_handler(State(state), Json(request)).await;

    let err = result.err().expect("empty query should be rejected");
    assert_eq!(err.0.status_code(), 400);
}

#[tokio::test]
async fn test_adding_same_knowledge_twice_keeps_one_document() {
    let state = test_state().await;

    for _ in 0..2 {
        let request = KnowledgeRequest {
            content: "Deduplicated fact".to_string(),
            metadata: DocumentMetadata::default(),
            user_id: "default_user".to_string(),
        };
        knowledge_handler(State(state.clone()), Json(request))
            .await
            .expect("knowledge handler should succeed");
    }

    let Json(stats) = stats_handler(State(state)).await;
    assert_eq!(stats.total_vectors, 1);
}

#[tokio::test]
async fn test_health_reports_degraded_offline() {
    let state = test_state().await;

    let Json(report) = health_handler(State(state)).await;
    assert_eq!(report.status, HealthStatus::Degraded);
}

#[tokio::test]
async fn test_stats_reports_memory_backend() {
    let state = test_state().await;

    let Json(stats) = stats_handler(State(state)).await;
    assert_eq!(stats.backend, "memory");
    assert_eq!(stats.total_vectors, 0);
    assert_eq!(stats.dimension, 384);
}
