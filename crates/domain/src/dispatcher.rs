//! Named-channel event dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use crate::HandlerError;
use crate::event::{DomainEvent, EventHandler};

/// Routes domain events to the handlers registered under their type name.
///
/// The dispatcher is an owned value: create one, register handlers, pass it
/// to whatever publishes. Handlers run synchronously in registration order
/// and the first failure stops the notification.
///
/// Handler identity is `Arc` identity: two clones of the same `Arc` are the
/// same handler, two separately allocated handlers are not.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler under `event_name`.
    ///
    /// Registering the same handler twice makes it run twice.
    pub fn register(&mut self, event_name: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let event_name = event_name.into();
        tracing::debug!(event_name = %event_name, "registering event handler");
        self.handlers.entry(event_name).or_default().push(handler);
    }

    /// Removes the first registration of `handler` under `event_name`.
    ///
    /// Unknown names or handlers are ignored. The name stays registered
    /// even when its last handler is removed.
    pub fn unregister(&mut self, event_name: &str, handler: &Arc<dyn EventHandler>) {
        let Some(handlers) = self.handlers.get_mut(event_name) else {
            return;
        };
        if let Some(index) = handlers.iter().position(|h| same_handler(h, handler)) {
            handlers.remove(index);
            tracing::debug!(event_name, remaining = handlers.len(), "unregistered event handler");
        }
    }

    /// Drops every registration.
    pub fn unregister_all(&mut self) {
        self.handlers.clear();
    }

    /// Returns the handlers registered under `event_name`, or `None` if the
    /// name was never registered (or was cleared by [`unregister_all`]).
    ///
    /// [`unregister_all`]: Self::unregister_all
    pub fn handlers(&self, event_name: &str) -> Option<&[Arc<dyn EventHandler>]> {
        self.handlers.get(event_name).map(Vec::as_slice)
    }

    /// Delivers `event` to every handler registered under its type name.
    ///
    /// Returns the first handler error; handlers after it are not called.
    pub fn notify(&self, event: &dyn DomainEvent) -> Result<(), HandlerError> {
        let event_type = event.event_type();
        let Some(handlers) = self.handlers.get(event_type) else {
            return Ok(());
        };

        for handler in handlers {
            if let Err(err) = handler.handle(event) {
                tracing::warn!(event_type, error = %err, "event handler failed");
                return Err(err);
            }
        }

        metrics::counter!("dispatcher_notifications_total", "event_type" => event_type)
            .increment(1);
        Ok(())
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&str, usize> = self
            .handlers
            .iter()
            .map(|(name, handlers)| (name.as_str(), handlers.len()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("handlers", &counts)
            .finish()
    }
}

// Compares data pointers only; vtable pointers for the same type may differ
// between codegen units.
fn same_handler(a: &Arc<dyn EventHandler>, b: &Arc<dyn EventHandler>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
