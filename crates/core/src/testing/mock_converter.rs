//! Mock converter for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{ConverterError, FormatConverter};

/// What a mock converter does when asked to convert.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this payload.
    Accept(Vec<u8>),
    /// Fail with this error.
    Fail(ConverterError),
    /// Panic inside the conversion future.
    Panic,
}

/// Mock implementation of the FormatConverter trait.
///
/// Provides controllable behavior for testing:
/// - Accept with a fixed payload, decline with a message, or panic
/// - Simulated conversion latency
/// - Recording of every document it was asked to convert
///
/// # Example
///
/// ```rust,ignore
/// use importer_core::testing::MockConverter;
///
/// let compose = MockConverter::accepting("compose", r#"{"app-info":[{}]}"#)
///     .with_delay(Duration::from_millis(20));
/// let kubernetes = MockConverter::declining("kubernetes", "missing kind -- can't validate");
///
/// // Change behavior mid-test
/// kubernetes.set_behavior(MockBehavior::Accept(b"{}".to_vec())).await;
/// ```
#[derive(Debug, Clone)]
pub struct MockConverter {
    name: String,
    behavior: Arc<RwLock<MockBehavior>>,
    delay: Arc<RwLock<Duration>>,
    documents: Arc<RwLock<Vec<Vec<u8>>>>,
}

impl MockConverter {
    /// Create a mock with the given behavior and no delay.
    pub fn new(name: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            behavior: Arc::new(RwLock::new(behavior)),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A converter that recognizes every document.
    pub fn accepting(name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self::new(name, MockBehavior::Accept(payload.into()))
    }

    /// A converter that declines every document with `message`.
    pub fn declining(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, MockBehavior::Fail(ConverterError::rejected(message)))
    }

    /// A converter that fails with `error`.
    pub fn failing(name: impl Into<String>, error: ConverterError) -> Self {
        Self::new(name, MockBehavior::Fail(error))
    }

    /// A converter that panics.
    pub fn panicking(name: impl Into<String>) -> Self {
        Self::new(name, MockBehavior::Panic)
    }

    /// Set the simulated conversion latency.
    pub fn with_delay(self, delay: Duration) -> Self {
        Self {
            delay: Arc::new(RwLock::new(delay)),
            ..self
        }
    }

    /// Change the behavior.
    pub async fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.write().await = behavior;
    }

    /// Change the simulated conversion latency.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Documents this converter was asked to convert, in call order.
    pub async fn recorded_documents(&self) -> Vec<Vec<u8>> {
        self.documents.read().await.clone()
    }

    /// Number of conversions requested.
    pub async fn call_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl FormatConverter for MockConverter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn convert(&self, document: &[u8]) -> Result<Vec<u8>, ConverterError> {
        self.documents.write().await.push(document.to_vec());

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let behavior = self.behavior.read().await.clone();
        match behavior {
            MockBehavior::Accept(payload) => Ok(payload),
            MockBehavior::Fail(error) => Err(error),
            MockBehavior::Panic => panic!("mock converter {} panicked", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_accepting_returns_payload() {
        let converter = MockConverter::accepting("compose", "{}");
        assert_eq!(converter.convert(b"doc").await.unwrap(), b"{}".to_vec());
        assert_eq!(converter.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_declining_returns_message() {
        let converter = MockConverter::declining("bundle", "invalid tar input");
        let err = converter.convert(b"doc").await.unwrap_err();
        assert_eq!(err.to_string(), "invalid tar input");
    }

    #[tokio::test]
    async fn test_behavior_can_change() {
        let converter = MockConverter::declining("compose", "invalid yaml");
        converter
            .set_behavior(MockBehavior::Accept(b"ok".to_vec()))
            .await;
        assert_eq!(converter.convert(b"doc").await.unwrap(), b"ok".to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let converter =
            MockConverter::accepting("compose", "{}").with_delay(Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        converter.convert(b"doc").await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
