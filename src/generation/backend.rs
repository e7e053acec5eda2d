// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer generator backend trait definition

use async_trait::async_trait;

use super::types::GenerationError;

/// Trait implemented by answer generation backends
///
/// The remote LLM adapter and the rule-based responder both implement
/// this trait, so the router can fail over between them per call.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Produce an answer for the query, grounded in the retrieved context
    /// when one is available
    async fn generate(&self, query: &str, context: &str) -> Result<String, GenerationError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Cheap reachability check; in-process backends are always reachable
    async fn probe(&self) -> bool {
        true
    }
}
