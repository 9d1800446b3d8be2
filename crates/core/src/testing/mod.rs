//! Testing utilities and mock implementations.
//!
//! This module provides a mock converter and document fixtures, allowing the
//! orchestrator, the import service and the HTTP layer to be tested without a
//! running converter service.
//!
//! # Example
//!
//! ```rust,ignore
//! use importer_core::testing::{fixtures, MockConverter};
//!
//! let converters = fixtures::compose_only_converters(fixtures::flat_file_json("web"));
//! let orchestrator = ImportOrchestrator::new(converters, Duration::from_secs(5));
//! ```

mod mock_converter;

pub use mock_converter::{MockBehavior, MockConverter};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::MockConverter;
    use crate::converter::FormatConverter;

    /// A small compose document.
    pub const COMPOSE_DOCUMENT: &str = "services:\n  web:\n    image: nginx\n";

    /// A flat file with one application-info record.
    pub fn flat_file(app_name: &str) -> Value {
        json!({
            "app-info": [{ "name": app_name, "version": "1" }],
            "services": [{ "name": "web", "image": "nginx" }]
        })
    }

    /// `flat_file` serialized, as a converter would return it.
    pub fn flat_file_json(app_name: &str) -> Vec<u8> {
        serde_json::to_vec(&flat_file(app_name)).unwrap_or_default()
    }

    /// The three standard converters, each declining with its usual phrase.
    pub fn declining_converters() -> Vec<MockConverter> {
        vec![
            MockConverter::declining("kubernetes", "missing kind -- can't validate"),
            MockConverter::declining("bundle", "invalid tar input"),
            MockConverter::declining("compose", "Invalid compose file: root must be a mapping"),
        ]
    }

    /// The standard converters where only compose accepts, returning `payload`.
    pub fn compose_only_converters(payload: Vec<u8>) -> Vec<Arc<dyn FormatConverter>> {
        vec![
            Arc::new(MockConverter::declining("kubernetes", "missing kind -- can't validate")),
            Arc::new(MockConverter::declining("bundle", "invalid tar input")),
            Arc::new(MockConverter::accepting("compose", payload)),
        ]
    }

    /// Erase mock types for the orchestrator.
    pub fn as_converters(mocks: Vec<MockConverter>) -> Vec<Arc<dyn FormatConverter>> {
        mocks
            .into_iter()
            .map(|m| Arc::new(m) as Arc<dyn FormatConverter>)
            .collect()
    }
}
