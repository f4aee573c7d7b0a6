//! Order aggregate and its items.

use serde::Serialize;

use crate::ValidationError;

/// A line of an order.
///
/// Items are only checked through the [`Order`] that owns them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    id: String,
    product_id: String,
    name: String,
    price: f64,
    quantity: i32,
}

impl OrderItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        product_id: impl Into<String>,
        quantity: i32,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Returns `price * quantity`.
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Order aggregate root.
///
/// An order owns a non-empty list of items and references its customer by
/// id. Orders are immutable: a changed order is a new `Order` carrying the
/// same id, handed to the repository's `update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: String,
    customer_id: String,
    items: Vec<OrderItem>,
    total: f64,
}

impl Order {
    /// Creates an order.
    ///
    /// Checks run in this order: id, customer id, item count, then each
    /// item's quantity. The total is derived from the items.
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        items: Vec<OrderItem>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let customer_id = customer_id.into();

        if id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        if customer_id.is_empty() {
            return Err(ValidationError::CustomerIdRequired);
        }
        if items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        if let Some(item) = items.iter().find(|item| item.quantity <= 0) {
            return Err(ValidationError::InvalidQuantity {
                item_id: item.id.clone(),
                quantity: item.quantity,
            });
        }

        let total = items.iter().map(OrderItem::total).sum();

        Ok(Self {
            id,
            customer_id,
            items,
            total,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Returns the items in the order they were given.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the sum of every item's total.
    pub fn total(&self) -> f64 {
        self.total
    }
}
