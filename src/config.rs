// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration loaded from environment variables

use std::env;

/// Default HTTP port for the API server
pub const DEFAULT_API_PORT: u16 = 8000;

/// Top-level configuration for the node
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP API binds to
    pub api_port: u16,
    /// Remote vector database configuration
    pub vector_db: VectorDbConfig,
    /// Remote LLM service configuration
    pub llm: LlmConfig,
}

/// Configuration for the remote vector database backend
#[derive(Debug, Clone)]
pub struct VectorDbConfig {
    /// Service endpoint, e.g. "https://vectors.example.com"
    pub endpoint: Option<String>,
    /// API key for the service
    pub api_key: Option<String>,
    /// Collection holding the knowledge base
    pub collection: String,
    /// Region the collection is created in
    pub region: String,
}

/// Configuration for the remote LLM service backend
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Service endpoint, e.g. "http://localhost:11434"
    pub endpoint: String,
    /// Model name sent with generation requests
    pub model: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_API_PORT),
            vector_db: VectorDbConfig::from_env(),
            llm: LlmConfig::from_env(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_port == 0 {
            return Err("API port must be greater than 0".to_string());
        }
        self.vector_db.validate()?;
        self.llm.validate()?;
        Ok(())
    }
}

impl VectorDbConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("VECTOR_DB_URL").ok(),
            api_key: env::var("VECTOR_DB_API_KEY").ok(),
            collection: env::var("VECTOR_DB_INDEX")
                .unwrap_or_else(|_| "jarvis-knowledge".to_string()),
            region: env::var("VECTOR_DB_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }

    /// Check if the remote backend has everything it needs to connect
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.collection.is_empty() {
            return Err("Vector collection name must not be empty".to_string());
        }
        if let Some(ref endpoint) = self.endpoint {
            if endpoint.is_empty() {
                return Err("VECTOR_DB_URL must not be empty when set".to_string());
            }
        }
        Ok(())
    }
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("LLM_URL").unwrap_or_else(|_| "http://localhost:11434".to_string()),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| "llama2".to_string()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("LLM endpoint must not be empty".to_string());
        }
        if self.model.is_empty() {
            return Err("LLM model name must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: DEFAULT_API_PORT,
            vector_db: VectorDbConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            collection: "jarvis-knowledge".to_string(),
            region: "us-east-1".to_string(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "llama2".to_string(),
        }
    }
}
