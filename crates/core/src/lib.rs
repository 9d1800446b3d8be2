pub mod cache;
pub mod config;
pub mod converter;
pub mod import;
pub mod metrics;
pub mod orchestrator;
pub mod testing;

pub use cache::{CacheConfig, CacheError, ResultCache, SweeperHandle};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ServerConfig,
};
pub use converter::{
    build_http_converters, ConversionAttempt, ConverterEndpoint, ConverterError,
    ConvertersConfig, FormatConverter, HttpConverter,
};
pub use import::{ImportError, ImportOutcome, ImportRequest, ImportService};
pub use orchestrator::{AggregateResult, ImportOrchestrator, OrchestratorError};
