// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};

use crate::index::DocumentMetadata;
use crate::rag::orchestrator::DEFAULT_USER_ID;

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub query: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

/// Body of `POST /knowledge`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeRequest {
    pub content: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

/// Response of `POST /knowledge`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeResponse {
    pub status: String,
    pub message: String,
    pub document_id: String,
}
