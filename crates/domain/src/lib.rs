//! Domain layer for the sales system.
//!
//! This crate provides:
//! - Self-validating entities: Address, Customer, Product, Order, OrderItem
//! - Domain events and the EventHandler trait
//! - EventDispatcher for named-channel publish/subscribe
//! - ProductService for catalog-wide price changes

pub mod dispatcher;
pub mod entity;
pub mod error;
pub mod event;
pub mod service;

pub use dispatcher::EventDispatcher;
pub use entity::{Address, Customer, Order, OrderItem, Product};
pub use error::{HandlerError, ValidationError};
pub use event::{
    CustomerChangeAddress, CustomerCreated, DomainEvent, EventHandler, ProductCreated,
    handlers::{ConsoleLogHandler, SendEmailWhenProductIsCreatedHandler},
};
pub use service::ProductService;
