use thiserror::Error;

/// Errors from the result cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Every slot holds a live entry.
    #[error("cache limit exceeded (capacity {capacity})")]
    Full { capacity: usize },

    /// The ticket generator kept producing tickets that are already in use.
    #[error("could not generate an unused ticket after {attempts} attempts")]
    TicketCollision { attempts: usize },
}
