//! Import service: conversion plus the inline-or-deferred response policy.

mod error;
mod flat_file;
mod service;
mod types;

pub use error::{ImportError, CACHE_LIMIT_MESSAGE, TICKET_NOT_FOUND_PREFIX};
pub use flat_file::{inject_name, APP_INFO_KEY};
pub use service::ImportService;
pub use types::{ImportOutcome, ImportRequest};
