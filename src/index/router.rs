// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Failover routing between the remote and in-process index backends

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::backend::VectorIndex;
use super::local::LocalIndex;
use super::types::{content_id, Document, DocumentMetadata, IndexError, IndexStats, QueryResult};
use crate::embeddings::{EmbeddingProvider, EMBEDDING_DIMENSION};

/// Which backend a router prefers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBackend {
    Remote,
    Local,
}

/// Routes upserts and queries to the remote index when it is the primary,
/// falling back to the in-process index for the failing call only.
///
/// The primary is decided once at construction from a reachability probe
/// and is never revoked by a runtime failure: the next call retries the
/// primary first. Non-transient errors (bad input, failed embedding)
/// propagate to the caller without a fallback attempt.
pub struct IndexRouter {
    embeddings: Arc<dyn EmbeddingProvider>,
    remote: Option<Arc<dyn VectorIndex>>,
    local: Arc<LocalIndex>,
    primary: IndexBackend,
}

impl IndexRouter {
    /// Create a router, probing the remote backend once to pick the primary
    pub async fn new(
        embeddings: Arc<dyn EmbeddingProvider>,
        remote: Option<Arc<dyn VectorIndex>>,
        local: Arc<LocalIndex>,
    ) -> Self {
        let primary = match &remote {
            Some(backend) if backend.probe().await => {
                info!("Index router using remote backend: {}", backend.name());
                IndexBackend::Remote
            }
            Some(backend) => {
                warn!(
                    "Remote index {} unreachable, using in-memory index",
                    backend.name()
                );
                IndexBackend::Local
            }
            None => {
                info!("No remote vector index configured, using in-memory index");
                IndexBackend::Local
            }
        };

        Self {
            embeddings,
            remote,
            local,
            primary,
        }
    }

    /// Store text in the knowledge base and return its document id.
    ///
    /// The id is content-addressed, so storing identical text twice
    /// replaces the first record instead of growing the corpus. The
    /// embedding is computed once here and shared with whichever backend
    /// ends up holding the document.
    pub async fn upsert(
        &self,
        text: &str,
        metadata: DocumentMetadata,
        owner_id: &str,
    ) -> Result<String, IndexError> {
        let embedding = self.embeddings.embed(text).await?;
        let document = Document {
            id: content_id(text),
            text: text.to_string(),
            embedding,
            owner_id: owner_id.to_string(),
            metadata,
        };
        let id = document.id.clone();

        if self.primary == IndexBackend::Remote {
            if let Some(ref remote) = self.remote {
                match remote.upsert(document.clone()).await {
                    Ok(()) => return Ok(id),
                    Err(e) if e.is_transient() => {
                        warn!(
                            "Remote index upsert failed: {}, falling back to in-memory index",
                            e
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        self.local.upsert(document).await?;
        Ok(id)
    }

    /// Rank stored documents against a query vector
    pub async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<QueryResult>, IndexError> {
        if self.primary == IndexBackend::Remote {
            if let Some(ref remote) = self.remote {
                debug!("Querying remote index for top {} results", top_k);
                match remote.query(vector, top_k).await {
                    Ok(results) => return Ok(results),
                    Err(e) if e.is_transient() => {
                        warn!(
                            "Remote index query failed: {}, falling back to in-memory index",
                            e
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        self.local.query(vector, top_k).await
    }

    /// Stats for the backend currently serving queries. A failing remote
    /// stats call reports the in-memory view instead of erroring.
    pub async fn stats(&self) -> IndexStats {
        if self.primary == IndexBackend::Remote {
            if let Some(ref remote) = self.remote {
                match remote.count().await {
                    Ok(total_vectors) => {
                        return IndexStats {
                            backend: remote.name().to_string(),
                            total_vectors,
                            dimension: EMBEDDING_DIMENSION,
                        }
                    }
                    Err(e) => {
                        warn!("Remote index stats failed: {}, reporting in-memory view", e);
                    }
                }
            }
        }

        IndexStats {
            backend: self.local.name().to_string(),
            total_vectors: self.local.len().await,
            dimension: EMBEDDING_DIMENSION,
        }
    }

    /// True when the preferred remote backend is primary and answering a
    /// fresh reachability probe. Running on the in-memory fallback counts
    /// as degraded, not healthy.
    pub async fn health(&self) -> bool {
        match (&self.primary, &self.remote) {
            (IndexBackend::Remote, Some(remote)) => remote.probe().await,
            _ => false,
        }
    }

    /// The backend chosen at construction
    pub fn primary(&self) -> IndexBackend {
        self.primary
    }
}
