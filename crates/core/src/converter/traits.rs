//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConverterError;

/// A format-specific converter that turns a deployment document into a flat file.
///
/// Implementations either produce the converted payload or decline with a
/// message. A converter that does not recognize the document's format should
/// say so with one of the well-known "not my format" phrases so the classifier
/// can tell it apart from a genuine defect.
#[async_trait]
pub trait FormatConverter: Send + Sync {
    /// Returns the name of this converter, used in logs and metrics.
    fn name(&self) -> &str;

    /// Converts the raw document into the canonical payload.
    async fn convert(&self, document: &[u8]) -> Result<Vec<u8>, ConverterError>;
}
