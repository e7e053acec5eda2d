// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod embeddings;
pub mod generation;
pub mod index;
pub mod rag;
pub mod version;

// Re-export main types
pub use config::{AppConfig, LlmConfig, VectorDbConfig};
pub use embeddings::{EmbeddingError, EmbeddingProvider, HashEmbeddingProvider};
pub use generation::{AnswerGenerator, GenerationRouter, RemoteGenerator, RuleResponder};
pub use index::{Document, IndexRouter, LocalIndex, RemoteIndex, VectorIndex};
pub use rag::{Answer, HealthReport, RagError, RagOrchestrator};
