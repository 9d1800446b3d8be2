//! Ticket generation for the result cache.

use uuid::Uuid;

/// Produces globally unique, caller-opaque tickets.
pub trait TicketGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUID tickets.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTicketGenerator;

impl TicketGenerator for UuidTicketGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
