// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer generation backends and their failover router
//!
//! Answers come from a remote LLM service when one is reachable, or from a
//! deterministic rule-based responder otherwise. The rule path never
//! fails, so generation as a whole never produces a hard failure once
//! retrieval has succeeded.

pub mod backend;
pub mod remote;
pub mod router;
pub mod rules;
pub mod types;

pub use backend::AnswerGenerator;
pub use remote::{build_prompt, RemoteGenerator};
pub use router::{GenerationBackend, GenerationRouter};
pub use rules::RuleResponder;
pub use types::GenerationError;
