//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Imports (outcome counts, duration)
//! - Converter attempts (per converter, per result)
//! - Result cache (operations, live entries)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Import Metrics
// =============================================================================

/// Import requests total by outcome.
pub static IMPORT_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("importer_import_requests_total", "Total import requests"),
        // inline, deferred, unsupported, defect, timeout, cache_full, unexpected
        &["outcome"],
    )
    .unwrap()
});

/// Import duration in seconds, from fan-out to response.
pub static IMPORT_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "importer_import_duration_seconds",
            "Duration of import requests",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 90.0]),
        &["outcome"],
    )
    .unwrap()
});

// =============================================================================
// Converter Metrics
// =============================================================================

/// Converter attempts by converter and result.
pub static CONVERTER_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "importer_converter_attempts_total",
            "Converter attempts by result",
        ),
        &["converter", "result"], // "payload", "failure", "late"
    )
    .unwrap()
});

// =============================================================================
// Cache Metrics
// =============================================================================

/// Cache operations by operation and result.
pub static CACHE_OPERATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("importer_cache_operations_total", "Result cache operations"),
        &["operation", "result"], // insert: "stored"/"full", pop: "hit"/"miss", sweep: "expired"
    )
    .unwrap()
});

/// Live entries in the result cache.
pub static CACHE_ENTRIES: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("importer_cache_entries", "Live entries in the result cache").unwrap()
});

/// All core collectors, for registration in the server's registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(IMPORT_REQUESTS.clone()),
        Box::new(IMPORT_DURATION.clone()),
        Box::new(CONVERTER_ATTEMPTS.clone()),
        Box::new(CACHE_OPERATIONS.clone()),
        Box::new(CACHE_ENTRIES.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    #[test]
    fn test_all_metrics_register_cleanly() {
        let registry = Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }

        IMPORT_REQUESTS.with_label_values(&["inline"]).inc();
        let families = registry.gather();
        assert!(families
            .iter()
            .any(|f| f.get_name() == "importer_import_requests_total"));
    }
}
