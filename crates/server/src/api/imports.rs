//! Import API handlers.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use importer_core::{ImportError, ImportOutcome, ImportRequest};

use crate::state::AppState;

/// Envelope key holding the document to convert.
const IMPORT_FILE_KEY: &str = "importFile";

/// Envelope key holding the optional display name.
const NAME_KEY: &str = "name";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for an import
#[derive(Debug, Default, Deserialize)]
pub struct ImportParams {
    /// `true` parks the result and answers with a ticket
    pub save: Option<String>,
}

impl ImportParams {
    fn defer(&self) -> bool {
        self.save.as_deref() == Some("true")
    }
}

/// Response envelope shared by every import endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_file: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportEnvelope {
    fn flat_file(flat_file: Value) -> Self {
        Self {
            success: true,
            flat_file: Some(flat_file),
            guid: None,
            error: None,
        }
    }

    fn guid(ticket: String) -> Self {
        Self {
            success: true,
            flat_file: None,
            guid: Some(ticket),
            error: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            flat_file: None,
            guid: None,
            error: Some(message),
        }
    }
}

impl From<ImportOutcome> for ImportEnvelope {
    fn from(outcome: ImportOutcome) -> Self {
        match outcome {
            ImportOutcome::Inline(flat_file) => Self::flat_file(flat_file),
            ImportOutcome::Deferred { ticket } => Self::guid(ticket),
        }
    }
}

/// A failed import request, rendered as an error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    pub status: StatusCode,
    pub message: String,
}

impl ImportFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn unreadable() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "can't read input")
    }

    fn unparsable() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "can't parse input json")
    }

    fn missing_import_file() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "missing importFile key")
    }
}

impl From<ImportError> for ImportFailure {
    fn from(e: ImportError) -> Self {
        let status = match &e {
            ImportError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            ImportError::ConverterDefect(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ImportError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ImportError::CacheFull => StatusCode::SERVICE_UNAVAILABLE,
            ImportError::TicketNotFound(_) => StatusCode::NOT_FOUND,
            ImportError::UnexpectedResponse | ImportError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ImportFailure {
    fn into_response(self) -> Response {
        (self.status, Json(ImportEnvelope::error(self.message))).into_response()
    }
}

/// Turn a request body into an import request.
///
/// The body must be a JSON object (or `null`, which has no keys). The document
/// must be a string under `importFile`; a non-string `name` is ignored.
pub fn parse_envelope(body: &[u8], defer: bool) -> Result<ImportRequest, ImportFailure> {
    let envelope: Option<Map<String, Value>> =
        serde_json::from_slice(body).map_err(|_| ImportFailure::unparsable())?;
    let envelope = envelope.unwrap_or_default();

    let document = envelope
        .get(IMPORT_FILE_KEY)
        .and_then(Value::as_str)
        .ok_or_else(ImportFailure::missing_import_file)?;

    let mut request = ImportRequest::new(document).deferred(defer);
    if let Some(name) = envelope.get(NAME_KEY).and_then(Value::as_str) {
        request = request.with_name(name);
    }
    Ok(request)
}

// ============================================================================
// Handlers
// ============================================================================

/// Convert a document, returning the flat file or a ticket for it
pub async fn import_document(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ImportParams>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ImportEnvelope>, ImportFailure> {
    let body = body.map_err(|e| {
        warn!(error = %e, "Failed to read import body");
        ImportFailure::unreadable()
    })?;

    let request = parse_envelope(&body, params.defer())?;
    debug!(
        bytes = request.document.len(),
        defer = request.defer,
        named = request.name.is_some(),
        "Import requested"
    );

    let outcome = state.import_service().import(request).await.map_err(|e| {
        debug!(kind = e.kind(), error = %e, "Import failed");
        ImportFailure::from(e)
    })?;

    Ok(Json(outcome.into()))
}

/// Redeem a ticket from a deferred import
pub async fn fetch_import(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ImportEnvelope>, ImportFailure> {
    let flat_file = state.import_service().fetch(&id).await?;
    Ok(Json(ImportEnvelope::flat_file(flat_file)))
}
