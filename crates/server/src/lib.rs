//! HTTP surface of the import service.

pub mod api;
pub mod metrics;
pub mod state;
