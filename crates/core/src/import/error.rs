//! Error types for the import module.

use std::time::Duration;

use thiserror::Error;

/// Message reported when a deferred result cannot be parked.
pub const CACHE_LIMIT_MESSAGE: &str = "cache limit exceeded";

/// Prefix of the message reported for an unknown or spent ticket.
pub const TICKET_NOT_FOUND_PREFIX: &str = "no model for uuid";

/// Errors an import or a fetch can end with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// No converter recognized the document.
    #[error("{0}")]
    UnsupportedFormat(String),

    /// A converter recognized the document and found it defective.
    #[error("{0}")]
    ConverterDefect(String),

    /// Waiting for converters timed out.
    #[error("import attempts timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// The result cache has no free slot.
    #[error("cache limit exceeded")]
    CacheFull,

    /// Converters answered with something the service cannot use.
    #[error("unexpected converter response")]
    UnexpectedResponse,

    /// The result could not be parked for a reason other than capacity.
    #[error("failed to store result: {0}")]
    Storage(String),

    /// The ticket was never issued, already fetched, or expired.
    #[error("no model for uuid: {0}")]
    TicketNotFound(String),
}

impl ImportError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => "unsupported",
            Self::ConverterDefect(_) => "defect",
            Self::Timeout(_) => "timeout",
            Self::CacheFull => "cache_full",
            Self::UnexpectedResponse => "unexpected",
            Self::Storage(_) => "storage",
            Self::TicketNotFound(_) => "not_found",
        }
    }

    /// Whether the same request may succeed later without changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::CacheFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ImportError::CacheFull.to_string(), CACHE_LIMIT_MESSAGE);
        assert_eq!(
            ImportError::TicketNotFound("abc".into()).to_string(),
            format!("{}: abc", TICKET_NOT_FOUND_PREFIX)
        );
        assert_eq!(
            ImportError::Timeout(Duration::from_secs(30)).to_string(),
            "import attempts timed out after 30 seconds"
        );
        assert_eq!(
            ImportError::ConverterDefect("bad port".into()).to_string(),
            "bad port"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(ImportError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(ImportError::CacheFull.is_retryable());
        assert!(!ImportError::UnsupportedFormat("x".into()).is_retryable());
        assert!(!ImportError::ConverterDefect("x".into()).is_retryable());
    }
}
