//! Built-in event handlers.

use super::{DomainEvent, EventHandler};
use crate::HandlerError;

/// Writes every event it receives to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogHandler;

impl EventHandler for ConsoleLogHandler {
    fn handle(&self, event: &dyn DomainEvent) -> Result<(), HandlerError> {
        tracing::info!(
            event_type = event.event_type(),
            occurred_at = %event.occurred_at(),
            payload = %event.payload(),
            "domain event"
        );
        Ok(())
    }
}

/// Announces the e-mail sent when a product is created.
#[derive(Debug, Default, Clone, Copy)]
pub struct SendEmailWhenProductIsCreatedHandler;

impl EventHandler for SendEmailWhenProductIsCreatedHandler {
    fn handle(&self, event: &dyn DomainEvent) -> Result<(), HandlerError> {
        let product = event
            .payload()
            .get("name")
            .and_then(|name| name.as_str())
            .unwrap_or("<unnamed>");
        tracing::info!(product, "sending product created e-mail");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Product, ProductCreated};

    #[test]
    fn test_builtin_handlers_accept_any_payload() {
        let product = Product::new("p1", "Product 1", 10.0).unwrap();
        let event = ProductCreated::for_product(&product);
        assert!(ConsoleLogHandler.handle(&event).is_ok());
        assert!(SendEmailWhenProductIsCreatedHandler.handle(&event).is_ok());

        let bare = ProductCreated::new(serde_json::Value::Null);
        assert!(SendEmailWhenProductIsCreatedHandler.handle(&bare).is_ok());
    }
}
