// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use jarvis_rag_node::{
    api,
    config::AppConfig,
    embeddings::{EmbeddingProvider, HashEmbeddingProvider, EMBEDDING_DIMENSION},
    generation::{AnswerGenerator, GenerationRouter, RemoteGenerator},
    index::{IndexRouter, LocalIndex, RemoteIndex, VectorIndex},
    rag::RagOrchestrator,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Jarvis RAG Node...\n");
    println!("📦 BUILD VERSION: {}", jarvis_rag_node::version::VERSION);
    println!("📅 Build Date: {}", jarvis_rag_node::version::BUILD_DATE);
    println!();

    let config = AppConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(HashEmbeddingProvider::new());
    println!(
        "🧠 Embedding provider: {} ({}D)",
        embeddings.model_name(),
        EMBEDDING_DIMENSION
    );

    // Remote vector database is optional. A node without one still
    // serves every endpoint from the in-memory index.
    let local_index = Arc::new(LocalIndex::new());
    let remote_index: Option<Arc<dyn VectorIndex>> = if config.vector_db.is_configured() {
        println!("🗄️  Connecting to remote vector database...");
        match RemoteIndex::connect(config.vector_db.clone()).await {
            Ok(index) => {
                println!("✅ Remote vector database connected");
                Some(Arc::new(index))
            }
            Err(e) => {
                println!("⚠️  Remote vector database unavailable: {}", e);
                println!("   Falling back to in-memory index");
                None
            }
        }
    } else {
        println!("ℹ️  No remote vector database configured - using in-memory index");
        None
    };
    let index_router = IndexRouter::new(embeddings.clone(), remote_index, local_index).await;
    let index_primary = index_router.primary();

    let generator: Option<Arc<dyn AnswerGenerator>> =
        match RemoteGenerator::new(config.llm.clone()) {
            Ok(generator) => Some(Arc::new(generator)),
            Err(e) => {
                println!("⚠️  LLM service misconfigured: {}", e);
                println!("   Falling back to rule-based responses");
                None
            }
        };
    let generation_router = GenerationRouter::new(generator).await;
    let generation_primary = generation_router.primary();

    let orchestrator = Arc::new(RagOrchestrator::new(
        embeddings,
        index_router,
        generation_router,
    ));

    let separator = "=".repeat(60);
    println!("\n{}", separator);
    println!("🎉 Jarvis RAG Node is ready!");
    println!("{}", separator);
    println!("API Port:           {}", config.api_port);
    println!("Index backend:      {:?}", index_primary);
    println!("Generation backend: {:?}", generation_primary);
    println!("LLM model:          {}", config.llm.model);
    println!("\nAPI Endpoints:");
    println!("  Chat:       POST http://localhost:{}/chat", config.api_port);
    println!(
        "  Knowledge:  POST http://localhost:{}/knowledge",
        config.api_port
    );
    println!("  Health:     http://localhost:{}/health", config.api_port);
    println!("  Stats:      http://localhost:{}/stats", config.api_port);
    println!("\nTest with curl:");
    println!("  curl -X POST http://localhost:{}/chat \\", config.api_port);
    println!("    -H 'Content-Type: application/json' \\");
    println!("    -d '{{\"query\": \"What is the capital of France?\"}}'");
    println!("\nPress Ctrl+C to shutdown...");
    println!("{}\n", separator);

    api::start_server(orchestrator, config.api_port)
        .await
        .map_err(|e| anyhow::anyhow!("API server failed: {}", e))?;

    Ok(())
}
