//! Product events.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use super::DomainEvent;
use crate::Product;

/// A product was added to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCreated {
    occurred_at: DateTime<Utc>,
    payload: Value,
}

impl ProductCreated {
    pub const EVENT_TYPE: &'static str = "ProductCreatedEvent";

    pub fn new(payload: Value) -> Self {
        Self {
            occurred_at: Utc::now(),
            payload,
        }
    }

    pub fn for_product(product: &Product) -> Self {
        Self::new(json!({
            "id": product.id(),
            "name": product.name(),
            "price": product.price(),
        }))
    }
}

impl DomainEvent for ProductCreated {
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
