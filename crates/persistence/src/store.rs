use async_trait::async_trait;

use crate::{CustomerRow, OrderItemRow, OrderRecord, OrderRow, ProductRow, Result};

/// Repository contract shared by every aggregate.
///
/// Implementations rebuild entities through their constructors on read, so
/// anything returned by `find` or `find_all` satisfies the entity invariants.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Stores a new entity.
    ///
    /// Fails with `Persistence` if the store rejects the write.
    async fn create(&self, entity: &T) -> Result<()>;

    /// Overwrites the stored entity with the same id.
    ///
    /// Fails with `NotFound` if nothing is stored under that id.
    async fn update(&self, entity: &T) -> Result<()>;

    /// Loads the entity stored under `id`.
    ///
    /// Fails with `NotFound` if nothing is stored under that id.
    async fn find(&self, id: &str) -> Result<T>;

    /// Loads every stored entity, in the order the store returns them.
    async fn find_all(&self) -> Result<Vec<T>>;
}

/// Row-level access to the `customers` table.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn insert_customer(&self, row: CustomerRow) -> Result<()>;

    /// Overwrites the row with the same id. Returns false if no row matched.
    async fn update_customer(&self, row: CustomerRow) -> Result<bool>;

    async fn find_customer(&self, id: &str) -> Result<Option<CustomerRow>>;

    async fn find_all_customers(&self) -> Result<Vec<CustomerRow>>;
}

/// Row-level access to the `products` table.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, row: ProductRow) -> Result<()>;

    /// Overwrites the row with the same id. Returns false if no row matched.
    async fn update_product(&self, row: ProductRow) -> Result<bool>;

    async fn find_product(&self, id: &str) -> Result<Option<ProductRow>>;

    async fn find_all_products(&self) -> Result<Vec<ProductRow>>;
}

/// Row-level access to the `orders` and `order_items` tables.
///
/// Each call is atomic on its own. Nothing spans several calls.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Writes an order row and all of its item rows as one write.
    async fn insert_order(&self, record: OrderRecord) -> Result<()>;

    /// Overwrites `customer_id` and `total` of the order row with the same
    /// id. Returns false if no row matched.
    async fn update_order(&self, row: OrderRow) -> Result<bool>;

    /// Loads an order row with its item rows.
    async fn find_order(&self, id: &str) -> Result<Option<OrderRecord>>;

    /// Loads every order row with its item rows.
    async fn find_all_orders(&self) -> Result<Vec<OrderRecord>>;

    /// Deletes every item row of `order_id`. Returns the number removed.
    async fn delete_items(&self, order_id: &str) -> Result<u64>;

    /// Inserts item rows in bulk. Any number of rows is accepted; either all
    /// of them are written or none.
    async fn insert_items(&self, items: Vec<OrderItemRow>) -> Result<()>;
}
