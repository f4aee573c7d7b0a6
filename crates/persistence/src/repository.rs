//! Aggregate repositories over a row-level store.

use async_trait::async_trait;
use domain::{Customer, Order, Product};

use crate::{
    CustomerRow, CustomerStore, OrderRecord, OrderStore, ProductRow, ProductStore, Repository,
    RepositoryError, Result,
};

fn record_write(entity: &'static str, operation: &'static str) {
    metrics::counter!("repository_writes_total", "entity" => entity, "operation" => operation)
        .increment(1);
}

/// Repository for [`Customer`] entities.
#[derive(Debug, Clone)]
pub struct CustomerRepository<S> {
    store: S,
}

impl<S: CustomerStore> CustomerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Gets a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: CustomerStore> Repository<Customer> for CustomerRepository<S> {
    #[tracing::instrument(skip(self, entity), fields(customer_id = %entity.id()))]
    async fn create(&self, entity: &Customer) -> Result<()> {
        self.store
            .insert_customer(CustomerRow::from_customer(entity))
            .await?;
        record_write("customer", "create");
        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(customer_id = %entity.id()))]
    async fn update(&self, entity: &Customer) -> Result<()> {
        if !self
            .store
            .update_customer(CustomerRow::from_customer(entity))
            .await?
        {
            return Err(RepositoryError::not_found("Customer", entity.id()));
        }
        record_write("customer", "update");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &str) -> Result<Customer> {
        let row = self
            .store
            .find_customer(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Customer", id))?;
        Ok(row.into_customer()?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Customer>> {
        let rows = self.store.find_all_customers().await?;
        rows.into_iter()
            .map(|row| row.into_customer().map_err(RepositoryError::from))
            .collect()
    }
}

/// Repository for [`Product`] entities.
#[derive(Debug, Clone)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: ProductStore> ProductRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Gets a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: ProductStore> Repository<Product> for ProductRepository<S> {
    #[tracing::instrument(skip(self, entity), fields(product_id = %entity.id()))]
    async fn create(&self, entity: &Product) -> Result<()> {
        self.store
            .insert_product(ProductRow::from_product(entity))
            .await?;
        record_write("product", "create");
        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(product_id = %entity.id()))]
    async fn update(&self, entity: &Product) -> Result<()> {
        if !self
            .store
            .update_product(ProductRow::from_product(entity))
            .await?
        {
            return Err(RepositoryError::not_found("Product", entity.id()));
        }
        record_write("product", "update");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &str) -> Result<Product> {
        let row = self
            .store
            .find_product(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Product", id))?;
        Ok(row.into_product()?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = self.store.find_all_products().await?;
        rows.into_iter()
            .map(|row| row.into_product().map_err(RepositoryError::from))
            .collect()
    }
}

/// Repository for the [`Order`] aggregate.
///
/// An order is stored as one `orders` row plus one `order_items` row per
/// item. After every successful `create` or `update` the stored item rows
/// are exactly the aggregate's items.
#[derive(Debug, Clone)]
pub struct OrderRepository<S> {
    store: S,
}

impl<S: OrderStore> OrderRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Gets a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: OrderStore> Repository<Order> for OrderRepository<S> {
    #[tracing::instrument(skip(self, entity), fields(order_id = %entity.id()))]
    async fn create(&self, entity: &Order) -> Result<()> {
        self.store
            .insert_order(OrderRecord::from_order(entity))
            .await?;
        record_write("order", "create");
        Ok(())
    }

    /// Replaces the stored order with `entity`.
    ///
    /// Runs four separate store calls: load the order row, overwrite its
    /// `customer_id` and `total`, delete all of its item rows, insert the new
    /// item rows. The sequence is not atomic. A failure or a concurrent
    /// update between the delete and the insert can leave the order with no
    /// items or with another writer's items; nothing is rolled back.
    #[tracing::instrument(skip(self, entity), fields(order_id = %entity.id()))]
    async fn update(&self, entity: &Order) -> Result<()> {
        if self.store.find_order(entity.id()).await?.is_none() {
            return Err(RepositoryError::not_found("Order", entity.id()));
        }

        let OrderRecord { order, items } = OrderRecord::from_order(entity);
        if !self.store.update_order(order).await? {
            return Err(RepositoryError::not_found("Order", entity.id()));
        }

        let removed = self.store.delete_items(entity.id()).await?;
        let inserted = items.len();
        self.store.insert_items(items).await?;

        tracing::debug!(removed, inserted, "order items replaced");
        record_write("order", "update");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &str) -> Result<Order> {
        let record = self
            .store
            .find_order(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Order", id))?;
        Ok(record.into_order()?)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Order>> {
        let records = self.store.find_all_orders().await?;
        records
            .into_iter()
            .map(|record| record.into_order().map_err(RepositoryError::from))
            .collect()
    }
}
