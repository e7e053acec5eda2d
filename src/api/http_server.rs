use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use super::errors::ApiError;
use super::types::{ChatRequest, KnowledgeRequest, KnowledgeResponse};
use crate::index::IndexStats;
use crate::rag::orchestrator::DEFAULT_TOP_K;
use crate::rag::{Answer, HealthReport, RagOrchestrator};
use crate::version;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RagOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<RagOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

pub async fn start_server(
    orchestrator: Arc<RagOrchestrator>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(orchestrator);

    let app = Router::new()
        // Service directory
        .route("/", get(root_handler))
        // RAG chat endpoint
        .route("/chat", post(chat_handler))
        // Knowledge ingestion
        .route("/knowledge", post(knowledge_handler))
        // Health check
        .route("/health", get(health_handler))
        // Index statistics
        .route("/stats", get(stats_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

pub async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "message": "Jarvis AI Assistant API",
        "version": version::VERSION_NUMBER,
        "endpoints": {
            "/chat": "POST - Send a query to Jarvis",
            "/knowledge": "POST - Add knowledge to the vector database",
            "/health": "GET - Check system health",
            "/stats": "GET - Vector index statistics"
        }
    }))
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Answer>, ApiErrorResponse> {
    state
        .orchestrator
        .answer(&request.query, &request.user_id, DEFAULT_TOP_K)
        .await
        .map(Json)
        .map_err(|e| ApiErrorResponse(e.into()))
}

pub async fn knowledge_handler(
    State(state): State<AppState>,
    Json(request): Json<KnowledgeRequest>,
) -> Result<Json<KnowledgeResponse>, ApiErrorResponse> {
    let document_id = state
        .orchestrator
        .add_knowledge(&request.content, request.metadata, &request.user_id)
        .await
        .map_err(|e| ApiErrorResponse(e.into()))?;

    Ok(Json(KnowledgeResponse {
        status: "success".to_string(),
        message: "Knowledge added successfully".to_string(),
        document_id,
    }))
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.orchestrator.health().await)
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.orchestrator.stats().await)
}

// Error response wrapper
#[derive(Debug)]
pub struct ApiErrorResponse(pub ApiError);

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let request_id = Uuid::new_v4().to_string();
        let error_response = self.0.to_response(Some(request_id));

        (status, Json(error_response)).into_response()
    }
}
