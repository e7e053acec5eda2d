// RAG (Retrieval-Augmented Generation) module
// Ties retrieval and generation together behind one query/answer surface

pub mod orchestrator;
pub mod types;

pub use orchestrator::{RagOrchestrator, DEFAULT_TOP_K};
pub use types::{Answer, HealthReport, HealthStatus, RagError, ServiceHealth, ServiceState};
