// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Similarity index backends and their failover router
//!
//! Two interchangeable backends store the knowledge base: a remote vector
//! database reached over HTTP and an in-process linear-scan index that is
//! always available. The router picks one per call with automatic
//! degradation to the in-process index.

pub mod backend;
pub mod local;
pub mod remote;
pub mod router;
pub mod types;

pub use backend::VectorIndex;
pub use local::LocalIndex;
pub use remote::RemoteIndex;
pub use router::{IndexBackend, IndexRouter};
pub use types::{content_id, Document, DocumentMetadata, IndexError, IndexStats, QueryResult};
