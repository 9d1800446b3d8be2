//! Inline-or-deferred import policy.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{CacheError, ResultCache};
use crate::metrics::{IMPORT_DURATION, IMPORT_REQUESTS};
use crate::orchestrator::{
    AggregateResult, ImportOrchestrator, OrchestratorError, UNSUPPORTED_FORMAT_MESSAGE,
};

use super::error::ImportError;
use super::flat_file::inject_name;
use super::types::{ImportOutcome, ImportRequest};

/// Converts documents and either returns the result or parks it under a ticket.
pub struct ImportService {
    orchestrator: ImportOrchestrator,
    cache: Arc<ResultCache<Value>>,
}

impl ImportService {
    pub fn new(orchestrator: ImportOrchestrator, cache: Arc<ResultCache<Value>>) -> Self {
        Self {
            orchestrator,
            cache,
        }
    }

    pub fn orchestrator(&self) -> &ImportOrchestrator {
        &self.orchestrator
    }

    pub fn cache(&self) -> &Arc<ResultCache<Value>> {
        &self.cache
    }

    /// Convert the request's document.
    pub async fn import(&self, request: ImportRequest) -> Result<ImportOutcome, ImportError> {
        let start = Instant::now();
        let result = self.run_import(request).await;

        let outcome = match &result {
            Ok(outcome) => outcome.kind(),
            Err(e) => e.kind(),
        };
        IMPORT_REQUESTS.with_label_values(&[outcome]).inc();
        IMPORT_DURATION
            .with_label_values(&[outcome])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    /// Redeem a ticket issued by a deferred import.
    pub async fn fetch(&self, ticket: &str) -> Result<Value, ImportError> {
        match self.cache.pop(ticket).await {
            Some(flat_file) => {
                debug!(ticket = %ticket, "Ticket redeemed");
                Ok(flat_file)
            }
            None => Err(ImportError::TicketNotFound(ticket.to_string())),
        }
    }

    async fn run_import(&self, request: ImportRequest) -> Result<ImportOutcome, ImportError> {
        let aggregate = self
            .orchestrator
            .run(request.document.as_bytes())
            .await
            .map_err(|e| match e {
                OrchestratorError::Timeout { timeout, .. } => ImportError::Timeout(timeout),
                OrchestratorError::CollectionClosed { .. } => ImportError::UnexpectedResponse,
            })?;

        let (payload, converter) = match aggregate {
            AggregateResult::Converted { payload, converter } => (payload, converter),
            AggregateResult::Unsupported => {
                return Err(ImportError::UnsupportedFormat(
                    UNSUPPORTED_FORMAT_MESSAGE.to_string(),
                ));
            }
            AggregateResult::Defect { message, .. } if message.is_empty() => {
                return Err(ImportError::UnexpectedResponse);
            }
            AggregateResult::Defect { message, .. } => {
                return Err(ImportError::ConverterDefect(message));
            }
        };

        let mut flat_file: Value = serde_json::from_slice(&payload).map_err(|e| {
            warn!(converter = %converter, error = %e, "Converter payload is not JSON");
            ImportError::UnexpectedResponse
        })?;

        if let Some(name) = request.name.as_deref() {
            if !inject_name(&mut flat_file, name) {
                debug!(converter = %converter, "Flat file has no application-info record to name");
            }
        }

        if !request.defer {
            return Ok(ImportOutcome::Inline(flat_file));
        }

        match self.cache.insert(flat_file).await {
            Ok(ticket) => {
                info!(ticket = %ticket, converter = %converter, "Parked import result");
                Ok(ImportOutcome::Deferred { ticket })
            }
            Err(CacheError::Full { .. }) => Err(ImportError::CacheFull),
            Err(e) => Err(ImportError::Storage(e.to_string())),
        }
    }
}
