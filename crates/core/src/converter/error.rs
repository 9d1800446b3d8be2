//! Error types for the converter module.

use thiserror::Error;

/// Errors a single format converter can report.
///
/// The `Display` text of every variant is what the classifier sees as the
/// attempt's failure message, so `Rejected` renders the converter's own
/// message with nothing added.
#[derive(Debug, Clone, Error)]
pub enum ConverterError {
    /// The converter looked at the document and refused it.
    #[error("{0}")]
    Rejected(String),

    /// The converter did not answer within the request timeout.
    #[error("converter request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The converter service could not be reached.
    #[error("converter connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other transport-level failure.
    #[error("converter request failed: {0}")]
    Request(String),

    /// The converter answered with something that is not a usable payload.
    #[error("invalid converter response: {0}")]
    InvalidResponse(String),
}

impl ConverterError {
    /// Creates a rejection carrying the converter's message verbatim.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Whether the failure came from the transport rather than the converter.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::ConnectionFailed(_) | Self::Request(_)
        )
    }
}
