// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod http_server;
pub mod types;

pub use errors::{ApiError, ErrorResponse};
pub use http_server::{start_server, ApiErrorResponse, AppState};
pub use types::{ChatRequest, KnowledgeRequest, KnowledgeResponse};
