//! Import orchestrator implementation.
//!
//! Races every configured converter against the same document:
//! - Fan-out: one task per converter, all started before any result is awaited
//! - Collection: results are read in arrival order, one bounded wait per result
//! - Classification: the collected attempts are folded by the `ResultClassifier`
//!
//! The bound applies to each wait separately, not to the fan-out as a whole.
//! When converters keep finishing just inside the bound of their own wait,
//! an import can take up to N times the bound before it times out.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::converter::{ConversionAttempt, FormatConverter};

use super::classifier::ResultClassifier;
use super::gateway::ConverterGateway;
use super::types::{AggregateResult, OrchestratorError};

/// Races a document against a fixed set of converters.
pub struct ImportOrchestrator {
    gateways: Vec<ConverterGateway>,
    classifier: ResultClassifier,
    await_timeout: Duration,
}

impl ImportOrchestrator {
    /// Create an orchestrator over `converters`, bounding each wait by `await_timeout`.
    pub fn new(converters: Vec<Arc<dyn FormatConverter>>, await_timeout: Duration) -> Self {
        Self {
            gateways: converters.into_iter().map(ConverterGateway::new).collect(),
            classifier: ResultClassifier::default(),
            await_timeout,
        }
    }

    /// Replace the default classifier.
    pub fn with_classifier(mut self, classifier: ResultClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn converter_names(&self) -> Vec<&str> {
        self.gateways.iter().map(|g| g.name()).collect()
    }

    pub fn await_timeout(&self) -> Duration {
        self.await_timeout
    }

    /// Convert `document` with whichever converter recognizes it.
    ///
    /// Converters still running when a wait times out are left alone; their
    /// results are dropped when they eventually arrive.
    pub async fn run(&self, document: &[u8]) -> Result<AggregateResult, OrchestratorError> {
        let expected = self.gateways.len();
        // Sized so every gateway can send without a reader.
        let (tx, mut rx) = mpsc::channel::<ConversionAttempt>(expected.max(1));
        let document: Arc<[u8]> = Arc::from(document);

        for gateway in &self.gateways {
            gateway.dispatch(Arc::clone(&document), tx.clone());
        }
        drop(tx);

        debug!(converters = expected, bytes = document.len(), "Dispatched import");

        let mut attempts = Vec::with_capacity(expected);
        while attempts.len() < expected {
            match timeout(self.await_timeout, rx.recv()).await {
                Ok(Some(attempt)) => {
                    debug!(
                        converter = %attempt.converter,
                        success = attempt.is_success(),
                        arrived = attempts.len() + 1,
                        "Converter attempt arrived"
                    );
                    attempts.push(attempt);
                }
                Ok(None) => {
                    warn!(
                        received = attempts.len(),
                        expected,
                        "Converter results channel closed early"
                    );
                    return Err(OrchestratorError::CollectionClosed {
                        received: attempts.len(),
                        expected,
                    });
                }
                Err(_) => {
                    warn!(
                        received = attempts.len(),
                        expected,
                        timeout_ms = self.await_timeout.as_millis() as u64,
                        "Timed out waiting for converter attempt"
                    );
                    return Err(OrchestratorError::Timeout {
                        timeout: self.await_timeout,
                        received: attempts.len(),
                        expected,
                    });
                }
            }
        }

        let result = self.classifier.classify(attempts);
        match &result {
            AggregateResult::Converted { converter, .. } => {
                info!(converter = %converter, "Document converted")
            }
            AggregateResult::Unsupported => info!("No converter recognized the document"),
            AggregateResult::Defect { converter, .. } => {
                info!(converter = %converter, "Converter reported a defect in the document")
            }
        }
        Ok(result)
    }
}
