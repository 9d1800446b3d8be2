//! Concurrent multi-format conversion.
//!
//! The orchestrator hands the same document to every configured converter at
//! once, waits for their attempts, and lets the classifier decide which single
//! payload or error the import reports.

mod classifier;
mod gateway;
mod runner;
mod types;

pub use classifier::{ResultClassifier, NOT_APPLICABLE_SENTINELS, UNSUPPORTED_FORMAT_MESSAGE};
pub use gateway::ConverterGateway;
pub use runner::ImportOrchestrator;
pub use types::{AggregateResult, OrchestratorError};
