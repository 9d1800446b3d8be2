//! Reduces converter attempts to one payload or one error.

use tracing::warn;

use crate::converter::ConversionAttempt;

use super::types::AggregateResult;

/// Message surfaced when every converter declined the document.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "input did not match any supported format; \
expected a recognized declarative deployment document or a compressed archive of such documents";

/// Phrases converters use to say "this is not my format".
pub const NOT_APPLICABLE_SENTINELS: &[&str] = &[
    "Invalid compose file:",
    "missing kind -- can't validate",
    "invalid yaml",
    "invalid tar input",
];

/// Tells declined inputs apart from defective ones.
#[derive(Debug, Clone)]
pub struct ResultClassifier {
    sentinels: Vec<String>,
}

impl Default for ResultClassifier {
    fn default() -> Self {
        Self::new(NOT_APPLICABLE_SENTINELS.iter().copied())
    }
}

impl ResultClassifier {
    pub fn new<I, S>(sentinels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sentinels: sentinels.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `message` only says the converter does not handle this format.
    pub fn is_not_applicable(&self, message: &str) -> bool {
        self.sentinels.iter().any(|s| message.contains(s.as_str()))
    }

    /// Fold attempts in arrival order.
    ///
    /// Any payload beats any error. Among payloads, and among non-sentinel
    /// failures, the one that arrived last wins.
    pub fn classify(&self, attempts: Vec<ConversionAttempt>) -> AggregateResult {
        let mut converted: Option<(Vec<u8>, String)> = None;
        let mut defect: Option<(String, String)> = None;
        let mut payloads = 0usize;

        for attempt in attempts {
            match attempt.outcome {
                Ok(payload) => {
                    payloads += 1;
                    converted = Some((payload, attempt.converter));
                }
                Err(message) if !self.is_not_applicable(&message) => {
                    defect = Some((message, attempt.converter));
                }
                Err(_) => {}
            }
        }

        if let Some((payload, converter)) = converted {
            if payloads > 1 {
                warn!(
                    payloads,
                    kept = %converter,
                    "Several converters accepted the document, keeping the last to finish"
                );
            }
            return AggregateResult::Converted { payload, converter };
        }

        match defect {
            Some((message, converter)) => AggregateResult::Defect { message, converter },
            None => AggregateResult::Unsupported,
        }
    }
}
