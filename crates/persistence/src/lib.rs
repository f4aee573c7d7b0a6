pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod rows;
pub mod store;

pub use config::DatabaseConfig;
pub use error::{RepositoryError, Result};
pub use memory::InMemorySalesStore;
pub use postgres::PostgresSalesStore;
pub use repository::{CustomerRepository, OrderRepository, ProductRepository};
pub use rows::{CustomerRow, OrderItemRow, OrderRecord, OrderRow, ProductRow};
pub use store::{CustomerStore, OrderStore, ProductStore, Repository};
