//! Orchestrator types.

use std::time::Duration;

use thiserror::Error;

/// The single outcome folded from every converter attempt of one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateResult {
    /// At least one converter produced a payload.
    Converted {
        payload: Vec<u8>,
        /// Converter whose payload was kept.
        converter: String,
    },
    /// Every converter declined the document as not being its format.
    Unsupported,
    /// A converter recognized the document but found it defective.
    Defect {
        message: String,
        /// Converter whose message was surfaced.
        converter: String,
    },
}

impl AggregateResult {
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    /// The payload, if conversion succeeded.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Converted { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// The error message a caller would see, if conversion failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Converted { .. } => None,
            Self::Unsupported => Some(super::classifier::UNSUPPORTED_FORMAT_MESSAGE),
            Self::Defect { message, .. } => Some(message),
        }
    }
}

/// Failures of the orchestration itself, separate from conversion outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// An individual wait for the next attempt exceeded its bound.
    #[error("import attempts timed out after {} seconds", .timeout.as_secs_f64())]
    Timeout {
        timeout: Duration,
        received: usize,
        expected: usize,
    },

    /// Every gateway went away before reporting.
    #[error("converter results channel closed after {received} of {expected} attempts")]
    CollectionClosed { received: usize, expected: usize },
}
