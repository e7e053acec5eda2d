// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for answer generation

use thiserror::Error;

/// Errors that can occur while generating an answer
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Endpoint is malformed or missing; non-fatal, the router prefers the
    /// rule-based responder until restart
    #[error("LLM service not configured: {reason}")]
    Unconfigured { reason: String },

    /// Network, timeout or protocol failure talking to the LLM service;
    /// triggers same-call fallback and is never surfaced to the caller
    #[error("LLM backend failure: {message}")]
    Backend { message: String },
}

impl GenerationError {
    pub fn backend(message: impl Into<String>) -> Self {
        GenerationError::Backend {
            message: message.into(),
        }
    }

    /// Whether the rule-based fallback should take over for this call
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerationError::Backend { .. })
    }
}
