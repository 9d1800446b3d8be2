//! Deferred-fetch result cache.
//!
//! Converted results that a caller wants to pick up later are parked here
//! under an opaque ticket. The cache holds a fixed number of entries, forgets
//! them after a fixed time-to-live, and hands each one out exactly once.

mod config;
mod error;
mod store;
mod ticket;

pub use config::CacheConfig;
pub use error::CacheError;
pub use store::{ResultCache, SweeperHandle};
pub use ticket::{TicketGenerator, UuidTicketGenerator};
