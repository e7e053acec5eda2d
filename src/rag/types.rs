// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer, health and error types for the RAG pipeline

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embeddings::EmbeddingError;
use crate::index::IndexError;

/// Answer to a knowledge-base query, with the sources that grounded it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub response: String,
    pub sources: Vec<String>,
}

/// Overall node condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Condition of a single backing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Operational,
    Unavailable,
}

impl ServiceState {
    pub fn from_healthy(healthy: bool) -> Self {
        if healthy {
            Self::Operational
        } else {
            Self::Unavailable
        }
    }
}

/// Per-service health breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub llm: ServiceState,
    pub index: ServiceState,
}

/// Aggregated health report for the whole node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub services: ServiceHealth,
}

impl HealthReport {
    /// Healthy only when every preferred backend is serving. A node on
    /// fallback paths still answers every query, so it is degraded and
    /// never down.
    pub fn from_states(llm_healthy: bool, index_healthy: bool) -> Self {
        let status = if llm_healthy && index_healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };
        Self {
            status,
            services: ServiceHealth {
                llm: ServiceState::from_healthy(llm_healthy),
                index: ServiceState::from_healthy(index_healthy),
            },
        }
    }
}

/// Errors the RAG pipeline surfaces to callers.
///
/// Transient backend failures never appear here: the routers absorb them
/// by falling back. What remains is bad input or a non-transient
/// configuration fault.
#[derive(Error, Debug)]
pub enum RagError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

impl RagError {
    /// True when the caller's input caused the failure, as opposed to a
    /// fault in this node or its backends
    pub fn is_client_error(&self) -> bool {
        match self {
            RagError::Embedding(_) => true,
            RagError::Index(e) => {
                matches!(e, IndexError::Input { .. } | IndexError::Embedding(_))
            }
        }
    }

    /// Get user-friendly error message for API responses
    pub fn user_message(&self) -> String {
        match self {
            RagError::Embedding(EmbeddingError::EmptyInput) => {
                "Query text cannot be empty".to_string()
            }
            RagError::Index(IndexError::Embedding(EmbeddingError::EmptyInput)) => {
                "Knowledge content cannot be empty".to_string()
            }
            RagError::Index(IndexError::Input { reason }) => reason.clone(),
            _ => self.to_string(),
        }
    }
}
