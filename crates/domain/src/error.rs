//! Domain error types.

use thiserror::Error;

/// A broken entity invariant.
///
/// Each variant names exactly one rule, so constructors report the first
/// failing check and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Entity identifier is empty.
    #[error("Id is required")]
    IdRequired,

    /// Entity name is empty.
    #[error("Name is required")]
    NameRequired,

    /// Product price is not strictly positive.
    #[error("Price must be greater than zero")]
    InvalidPrice,

    /// Order customer reference is empty.
    #[error("Customer id is required")]
    CustomerIdRequired,

    /// Order has no items.
    #[error("Item count must be greater than 0")]
    NoItems,

    /// An order item has a non-positive quantity.
    #[error("Quantity must be greater than 0 (item {item_id} has {quantity})")]
    InvalidQuantity { item_id: String, quantity: i32 },

    /// Address street is empty.
    #[error("Street is required")]
    StreetRequired,

    /// Address number is zero.
    #[error("Number is required")]
    NumberRequired,

    /// Address zip code is empty.
    #[error("Zip is required")]
    ZipRequired,

    /// Address city is empty.
    #[error("City is required")]
    CityRequired,

    /// Customer activation attempted without an address.
    #[error("Address is mandatory to activate a customer")]
    AddressRequired,
}

/// Failure raised by an event handler while processing a notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Handler {handler} failed: {message}")]
pub struct HandlerError {
    /// Name of the failing handler.
    pub handler: &'static str,

    /// What went wrong.
    pub message: String,
}

impl HandlerError {
    /// Creates a handler error.
    pub fn new(handler: &'static str, message: impl Into<String>) -> Self {
        Self {
            handler,
            message: message.into(),
        }
    }
}
