// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Failover routing between the LLM service and the rule-based responder

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::backend::AnswerGenerator;
use super::rules::RuleResponder;

/// Which backend a router prefers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationBackend {
    Remote,
    Rules,
}

/// Routes answer generation to the LLM service when it is the primary,
/// answering with the rule-based responder for the failing call only.
///
/// The primary is decided once at construction from a reachability probe
/// and is never revoked by a runtime failure: the next call retries the
/// primary first. Unlike retrieval, generation never surfaces an error to
/// the caller, because the rule-based responder always produces an answer.
pub struct GenerationRouter {
    remote: Option<Arc<dyn AnswerGenerator>>,
    rules: RuleResponder,
    primary: GenerationBackend,
}

impl GenerationRouter {
    /// Create a router, probing the LLM service once to pick the primary
    pub async fn new(remote: Option<Arc<dyn AnswerGenerator>>) -> Self {
        let primary = match &remote {
            Some(backend) if backend.probe().await => {
                info!("Generation router using remote backend: {}", backend.name());
                GenerationBackend::Remote
            }
            Some(backend) => {
                warn!(
                    "LLM service {} unreachable, using rule-based responses",
                    backend.name()
                );
                GenerationBackend::Rules
            }
            None => {
                info!("No LLM service configured, using rule-based responses");
                GenerationBackend::Rules
            }
        };

        Self {
            remote,
            rules: RuleResponder::new(),
            primary,
        }
    }

    /// Produce an answer for a query given the retrieved context
    pub async fn generate(&self, query: &str, context: &str) -> String {
        if self.primary == GenerationBackend::Remote {
            if let Some(ref remote) = self.remote {
                debug!("Generating answer with remote backend {}", remote.name());
                match remote.generate(query, context).await {
                    Ok(answer) => return answer,
                    Err(e) => {
                        warn!(
                            "LLM generation failed: {}, falling back to rule-based responder",
                            e
                        );
                    }
                }
            }
        }

        self.rules.respond(query, context)
    }

    /// True when the preferred LLM backend is primary and answering a
    /// fresh reachability probe. Running on rules counts as degraded.
    pub async fn health(&self) -> bool {
        match (&self.primary, &self.remote) {
            (GenerationBackend::Remote, Some(remote)) => remote.probe().await,
            _ => false,
        }
    }

    /// The backend chosen at construction
    pub fn primary(&self) -> GenerationBackend {
        self.primary
    }
}
