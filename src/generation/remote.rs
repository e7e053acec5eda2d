// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! LLM service adapter
//!
//! Talks to an Ollama-compatible completion endpoint. Prompt assembly
//! lives here too, so the router and orchestrator only ever deal in
//! query/context pairs.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::backend::AnswerGenerator;
use super::types::GenerationError;
use crate::config::LlmConfig;

/// Timeout for completion requests. Local models can be slow to first
/// token, so this is deliberately generous.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for reachability probes
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Build the completion prompt for a query, grounding the model in the
/// retrieved context when there is any.
pub fn build_prompt(query: &str, context: &str) -> String {
    if context.is_empty() {
        format!(
            "You are Jarvis, a helpful AI assistant. \
             Answer the user's question helpfully.\n\n\
             User Question: {}\n\nAnswer:",
            query
        )
    } else {
        format!(
            "You are Jarvis, a helpful AI assistant. \
             Use the following context to answer the user's question accurately and concisely.\n\n\
             Context:\n{}\n\nUser Question: {}\n\nAnswer:",
            context, query
        )
    }
}

/// Adapter over an external LLM completion service
pub struct RemoteGenerator {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl RemoteGenerator {
    pub fn new(config: LlmConfig) -> Result<Self, GenerationError> {
        reqwest::Url::parse(&config.endpoint).map_err(|e| GenerationError::Unconfigured {
            reason: format!("Invalid LLM_URL: {}", e),
        })?;

        let client = Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::backend(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model,
        })
    }

    /// Model this generator sends completions to
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AnswerGenerator for RemoteGenerator {
    async fn generate(&self, query: &str, context: &str) -> Result<String, GenerationError> {
        let prompt = build_prompt(query, context);
        let body = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::backend(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::backend(format!(
                "Generation failed: {}",
                error_text
            )));
        }

        let completion = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| GenerationError::backend(format!("Malformed generation response: {}", e)))?;

        debug!(
            "LLM completion received ({} chars) from model {}",
            completion.response.len(),
            self.model
        );
        Ok(completion.response)
    }

    fn name(&self) -> &'static str {
        "llm"
    }

    async fn probe(&self) -> bool {
        match self
            .client
            .get(format!("{}/api/tags", self.endpoint))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
