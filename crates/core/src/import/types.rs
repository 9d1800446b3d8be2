//! Import request and outcome types.

use serde_json::Value;

/// One import request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// The raw deployment document.
    pub document: String,
    /// Display name to put into the flat file's first application-info record.
    pub name: Option<String>,
    /// Park the result for later pickup instead of returning it.
    pub defer: bool,
}

impl ImportRequest {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            name: None,
            defer: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn deferred(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }
}

/// A successful import.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// The converted flat file.
    Inline(Value),
    /// Ticket redeemable once for the converted flat file.
    Deferred { ticket: String },
}

impl ImportOutcome {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inline(_) => "inline",
            Self::Deferred { .. } => "deferred",
        }
    }
}
