// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Remote vector database adapter
//!
//! Speaks the vector DB's HTTP API and translates its result schema into
//! [`QueryResult`]. Every transport, status or decode failure is collapsed
//! into a single transient backend error so raw protocol errors never
//! reach the router.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

use super::backend::VectorIndex;
use super::types::{Document, DocumentMetadata, IndexError, QueryResult};
use crate::config::VectorDbConfig;
use crate::embeddings::EMBEDDING_DIMENSION;

/// Timeout for upsert/query/stats requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for reachability probes
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Adapter over an external vector database reachable over HTTP
pub struct RemoteIndex {
    client: Client,
    endpoint: String,
    api_key: String,
    collection: String,
    region: String,
}

#[derive(Debug, Deserialize)]
struct SearchMatches {
    #[serde(default)]
    matches: Vec<RemoteMatch>,
}

#[derive(Debug, Deserialize)]
struct RemoteMatch {
    id: String,
    score: f32,
    #[serde(default)]
    metadata: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionStats {
    total_vectors: usize,
}

impl RemoteIndex {
    /// Connect to the remote vector database and make sure the target
    /// collection exists. Creating an already-existing collection is a
    /// no-op, so reconnecting against a correct collection never changes
    /// anything.
    pub async fn connect(config: VectorDbConfig) -> Result<Self, IndexError> {
        let endpoint = config.endpoint.clone().ok_or(IndexError::Unconfigured {
            reason: "VECTOR_DB_URL is not set".to_string(),
        })?;
        let api_key = config.api_key.clone().ok_or(IndexError::Unconfigured {
            reason: "VECTOR_DB_API_KEY is not set".to_string(),
        })?;

        reqwest::Url::parse(&endpoint).map_err(|e| IndexError::Unconfigured {
            reason: format!("Invalid VECTOR_DB_URL: {}", e),
        })?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IndexError::backend(format!("Failed to build HTTP client: {}", e)))?;

        let index = Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            collection: config.collection,
            region: config.region,
        };

        index.ensure_collection().await?;
        info!("Connected to remote vector collection: {}", index.collection);

        Ok(index)
    }

    async fn ensure_collection(&self) -> Result<(), IndexError> {
        let url = format!("{}/api/v1/collections/{}", self.endpoint, self.collection);
        let response = self
            .client
            .get(&url)
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| IndexError::backend(format!("Collection lookup failed: {}", e)))?;

        if response.status().is_success() {
            debug!("Collection {} already exists", self.collection);
            return Ok(());
        }
        if response.status() != StatusCode::NOT_FOUND {
            return Err(IndexError::backend(format!(
                "Collection lookup failed with status: {}",
                response.status()
            )));
        }

        info!("Creating vector collection: {}", self.collection);
        let body = json!({
            "name": self.collection,
            "dimension": EMBEDDING_DIMENSION,
            "metric": "cosine",
            "region": self.region,
        });
        let response = self
            .client
            .post(format!("{}/api/v1/collections", self.endpoint))
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::backend(format!("Collection create failed: {}", e)))?;

        // CONFLICT means another node created it first, which is fine
        if response.status().is_success() || response.status() == StatusCode::CONFLICT {
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(IndexError::backend(format!(
                "Collection create failed: {}",
                error_text
            )))
        }
    }

    /// Metadata stored with the vector: caller metadata plus the raw text
    /// and owner, so results are self-contained on the way back.
    fn wire_metadata(document: &Document) -> Result<Value, IndexError> {
        let mut metadata = serde_json::to_value(&document.metadata)
            .map_err(|e| IndexError::backend(format!("Metadata encoding failed: {}", e)))?;
        metadata["text"] = json!(document.text);
        metadata["user_id"] = json!(document.owner_id);
        Ok(metadata)
    }

    /// Translate one native match into a [`QueryResult`], splitting the
    /// stored text and owner back out of the metadata object.
    fn translate_match(m: RemoteMatch) -> QueryResult {
        let mut metadata = m.metadata;
        let text = metadata
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        if let Some(object) = metadata.as_object_mut() {
            object.remove("text");
            object.remove("user_id");
        }
        let metadata: DocumentMetadata = serde_json::from_value(metadata).unwrap_or_default();

        QueryResult {
            doc_id: m.id,
            score: m.score,
            text,
            metadata,
        }
    }
}

#[async_trait]
impl VectorIndex for RemoteIndex {
    async fn upsert(&self, document: Document) -> Result<(), IndexError> {
        let url = format!(
            "{}/api/v1/collections/{}/vectors",
            self.endpoint, self.collection
        );
        let body = json!({
            "id": document.id,
            "values": document.embedding,
            "metadata": Self::wire_metadata(&document)?,
        });

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::backend(format!("Upsert failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(IndexError::backend(format!("Upsert failed: {}", error_text)));
        }

        debug!("Document upserted to remote index: {}", document.id);
        Ok(())
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<QueryResult>, IndexError> {
        let url = format!(
            "{}/api/v1/collections/{}/search",
            self.endpoint, self.collection
        );
        let body = json!({
            "vector": vector,
            "k": top_k,
            "includeMetadata": true,
        });

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::backend(format!("Search failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(IndexError::backend(format!("Search failed: {}", error_text)));
        }

        let matches = response
            .json::<SearchMatches>()
            .await
            .map_err(|e| IndexError::backend(format!("Malformed search response: {}", e)))?;

        Ok(matches
            .matches
            .into_iter()
            .map(Self::translate_match)
            .collect())
    }

    async fn count(&self) -> Result<usize, IndexError> {
        let url = format!(
            "{}/api/v1/collections/{}/stats",
            self.endpoint, self.collection
        );
        let response = self
            .client
            .get(&url)
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| IndexError::backend(format!("Stats request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(IndexError::backend(format!(
                "Stats request failed with status: {}",
                response.status()
            )));
        }

        let stats = response
            .json::<CollectionStats>()
            .await
            .map_err(|e| IndexError::backend(format!("Malformed stats response: {}", e)))?;
        Ok(stats.total_vectors)
    }

    fn name(&self) -> &'static str {
        "remote"
    }

    async fn probe(&self) -> bool {
        let url = format!("{}/api/v1/health", self.endpoint);
        match self
            .client
            .get(&url)
            .header("Api-Key", &self.api_key)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
