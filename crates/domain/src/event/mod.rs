//! Domain events and their handlers.

mod customer;
pub mod handlers;
mod product;

pub use customer::{CustomerChangeAddress, CustomerCreated};
pub use product::ProductCreated;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::HandlerError;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and named in past tense. The payload shape is agreed
/// between producer and handler; the dispatcher never looks inside it.
pub trait DomainEvent: std::fmt::Debug + Send + Sync {
    /// Returns the event type name used as the dispatcher key.
    fn event_type(&self) -> &'static str;

    /// Returns when the event was raised.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Returns the event data.
    fn payload(&self) -> &Value;
}

/// A listener invoked by the dispatcher for the events it is registered to.
pub trait EventHandler: Send + Sync {
    /// Handles one event.
    ///
    /// An error aborts the notification it was raised in.
    fn handle(&self, event: &dyn DomainEvent) -> Result<(), HandlerError>;
}
