//! Converter module for turning deployment documents into flat files.
//!
//! This module provides the `FormatConverter` trait and an HTTP implementation
//! that calls the converter service. Each converter understands exactly one
//! input format (Kubernetes manifests, packaged bundles, compose files) and
//! either returns the converted payload or declines.
//!
//! # Example
//!
//! ```ignore
//! use importer_core::converter::{build_http_converters, ConvertersConfig};
//!
//! let converters = build_http_converters(&ConvertersConfig::default())?;
//! for converter in &converters {
//!     match converter.convert(document).await {
//!         Ok(payload) => println!("{} converted {} bytes", converter.name(), payload.len()),
//!         Err(e) => println!("{} declined: {}", converter.name(), e),
//!     }
//! }
//! ```

mod config;
mod error;
mod http;
mod traits;
mod types;

pub use config::{ConverterEndpoint, ConvertersConfig};
pub use error::ConverterError;
pub use http::{build_http_converters, HttpConverter};
pub use traits::FormatConverter;
pub use types::ConversionAttempt;
