//! Customer events.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use super::DomainEvent;
use crate::Customer;

/// A customer was registered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerCreated {
    occurred_at: DateTime<Utc>,
    payload: Value,
}

impl CustomerCreated {
    pub const EVENT_TYPE: &'static str = "CustomerCreatedEvent";

    pub fn new(payload: Value) -> Self {
        Self {
            occurred_at: Utc::now(),
            payload,
        }
    }

    /// Builds the event with the customer's id and name as payload.
    pub fn for_customer(customer: &Customer) -> Self {
        Self::new(json!({
            "id": customer.id(),
            "name": customer.name(),
        }))
    }
}

impl DomainEvent for CustomerCreated {
    fn event_type(&self) -> &'static str {
        Self::EVENT_TYPE
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn payload(&self) -> &Value {
        &self.payload
    }
}

/// A customer's address changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerChangeAddress {
    occurred_at: DateTime<Utc>,
    payload: Value,
}

impl CustomerChangeAddress {
    pub const EVENT_TYPE: &'static str = "CustomerChangeAddressEvent";

    pub fn new(payload: Value) -> Self {
        Self {
            occurred_at: Utc::now(),
            payload,
        }
    }

    /// Builds the event from the customer's current address.
    ///
    /// The address is carried in its canonical string form, or `null` when
    /// the customer has none.
    pub fn for_customer(customer: &Customer) -> Self {
        Self::new(json!({
            "id": customer.id(),
            "name": customer.name(),
            "address": customer.address().map(ToString::to_string),
        }))
    }
}

impl DomainEvent for CustomerChangeAddress {
    fn event_type(&self) -> &'static str {
        Self::EVENT_TYPE
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn payload(&self) -> &Value {
        &self.payload
    }
}
