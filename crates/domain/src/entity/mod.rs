//! Self-validating entities of the sales domain.

mod address;
mod customer;
mod order;
mod product;

pub use address::Address;
pub use customer::Customer;
pub use order::{Order, OrderItem};
pub use product::Product;
