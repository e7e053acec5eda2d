// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Deterministic rule-based answer generation
//!
//! Stateless fallback used whenever the LLM service is unavailable. Rules
//! are evaluated in a fixed priority order; the first match wins, and the
//! final rule always matches, so this path cannot fail.

use async_trait::async_trait;

use super::backend::AnswerGenerator;
use super::types::GenerationError;

/// Context shorter than this is ignored by the context rule
const CONTEXT_MIN_CHARS: usize = 50;

/// How much of the context the templated answer quotes
const CONTEXT_QUOTE_CHARS: usize = 500;

const GREETING_WORDS: &[&str] = &["hello", "hi", "hey"];
const WEATHER_WORDS: &[&str] = &["weather", "temperature"];
const QUESTION_WORDS: &[&str] = &["what", "how", "why", "when", "who"];
const CAPABILITY_WORDS: &[&str] = &["help", "capability", "can you"];

/// Priority-ordered pattern-matching responder
///
/// Rule order is load-bearing: retrieved context outranks every keyword
/// rule, and the keyword rules run in the order greeting, weather,
/// question, capability. Keywords match as substrings of the lower-cased
/// query.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleResponder;

impl RuleResponder {
    pub fn new() -> Self {
        Self
    }

    /// Produce an answer for the query. Always succeeds.
    pub fn respond(&self, query: &str, context: &str) -> String {
        // Retrieved context takes priority over everything else
        if !context.is_empty() && context.chars().count() > CONTEXT_MIN_CHARS {
            let quoted: String = context.chars().take(CONTEXT_QUOTE_CHARS).collect();
            return format!(
                "Based on the available information: {}...\n\nTo answer your question '{}', \
                 I've found relevant information in the knowledge base that suggests the above \
                 context is most relevant.",
                quoted, query
            );
        }

        let query_lower = query.to_lowercase();

        if contains_any(&query_lower, GREETING_WORDS) {
            return "Hello! I'm Jarvis, your AI assistant. How can I help you today?".to_string();
        }

        if contains_any(&query_lower, WEATHER_WORDS) {
            return "I can help with weather information, but I need integration with a weather \
                    API. For now, I can tell you that I'm designed to retrieve and provide \
                    contextual information from my knowledge base."
                .to_string();
        }

        if contains_any(&query_lower, QUESTION_WORDS) {
            return format!(
                "Regarding '{}', I've searched my knowledge base. To provide better answers, \
                 please add relevant information using the /knowledge endpoint. I use RAG \
                 (Retrieval Augmented Generation) to find and synthesize information from \
                 stored documents.",
                query
            );
        }

        if contains_any(&query_lower, CAPABILITY_WORDS) {
            return "I'm Jarvis, an AI assistant powered by a local LLM and a vector knowledge \
                    base. My capabilities include:\n\n\
                    1. **Conversational AI**: Natural language understanding and generation\n\
                    2. **Knowledge Retrieval**: Finding relevant information from stored \
                    documents using semantic search\n\
                    3. **Context-Aware Responses**: Using RAG to provide accurate, contextual \
                    answers\n\
                    4. **Learning**: Adding new knowledge to improve responses over time\n\n\
                    Try asking me questions or adding knowledge through the API!"
                .to_string();
        }

        format!(
            "I understand you're asking about: '{}'. I use semantic search to find relevant \
             information from my knowledge base. Currently, I may not have specific information \
             on this topic. You can add knowledge using the /knowledge endpoint to help me \
             answer better!",
            query
        )
    }
}

fn contains_any(query: &str, words: &[&str]) -> bool {
    words.iter().any(|word| query.contains(word))
}

#[async_trait]
impl AnswerGenerator for RuleResponder {
    async fn generate(&self, query: &str, context: &str) -> Result<String, GenerationError> {
        Ok(self.respond(query, context))
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}
