//! Types produced by converter invocations.

/// The outcome of one converter invocation.
///
/// Exactly one of payload or failure message exists, which is why the
/// outcome is a `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionAttempt {
    /// Name of the converter that produced this attempt.
    pub converter: String,
    /// Converted payload, or the converter's failure message.
    pub outcome: Result<Vec<u8>, String>,
}

impl ConversionAttempt {
    /// Creates a successful attempt.
    pub fn payload(converter: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            converter: converter.into(),
            outcome: Ok(payload),
        }
    }

    /// Creates a failed attempt.
    pub fn failure(converter: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            converter: converter.into(),
            outcome: Err(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The failure message, if this attempt failed.
    pub fn failure_message(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }
}
