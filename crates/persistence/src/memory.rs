use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    CustomerRow, CustomerStore, OrderItemRow, OrderRecord, OrderRow, OrderStore, ProductRow,
    ProductStore, RepositoryError, Result,
};

#[derive(Debug, Default)]
struct Tables {
    customers: Vec<CustomerRow>,
    products: Vec<ProductRow>,
    orders: Vec<OrderRow>,
    items: Vec<OrderItemRow>,
}

impl Tables {
    fn has_customer(&self, id: &str) -> bool {
        self.customers.iter().any(|c| c.id == id)
    }

    fn has_product(&self, id: &str) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    fn has_order(&self, id: &str) -> bool {
        self.orders.iter().any(|o| o.id == id)
    }

    fn items_of(&self, order_id: &str) -> Vec<OrderItemRow> {
        self.items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    /// Checks keys and references of `items` before anything is inserted.
    /// `pending_order` is an order row written in the same call.
    fn check_items(&self, items: &[OrderItemRow], pending_order: Option<&str>) -> Result<()> {
        let mut batch = HashSet::new();
        for item in items {
            if !batch.insert(item.id.as_str()) || self.items.iter().any(|i| i.id == item.id) {
                return Err(RepositoryError::rejected(
                    "order_items_pkey",
                    format!("duplicate order item id {}", item.id),
                ));
            }
            if pending_order != Some(item.order_id.as_str()) && !self.has_order(&item.order_id) {
                return Err(RepositoryError::rejected(
                    "order_items_order_id_fkey",
                    format!("order {} does not exist", item.order_id),
                ));
            }
            if !self.has_product(&item.product_id) {
                return Err(RepositoryError::rejected(
                    "order_items_product_id_fkey",
                    format!("product {} does not exist", item.product_id),
                ));
            }
        }
        Ok(())
    }
}

/// In-memory storage engine for tests and local runs.
///
/// Enforces the same keys and references as the PostgreSQL schema. A
/// rejected call writes nothing. Rows are returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySalesStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemorySalesStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of item rows stored for `order_id`.
    pub async fn item_count(&self, order_id: &str) -> usize {
        self.tables
            .read()
            .await
            .items
            .iter()
            .filter(|item| item.order_id == order_id)
            .count()
    }

    /// Returns the total number of item rows across all orders.
    pub async fn total_item_count(&self) -> usize {
        self.tables.read().await.items.len()
    }

    /// Clears every table.
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        *tables = Tables::default();
    }
}

#[async_trait]
impl CustomerStore for InMemorySalesStore {
    async fn insert_customer(&self, row: CustomerRow) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.has_customer(&row.id) {
            return Err(RepositoryError::rejected(
                "customers_pkey",
                format!("duplicate customer id {}", row.id),
            ));
        }
        tables.customers.push(row);
        Ok(())
    }

    async fn update_customer(&self, row: CustomerRow) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.customers.iter_mut().find(|c| c.id == row.id) {
            Some(existing) => {
                *existing = row;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_customer(&self, id: &str) -> Result<Option<CustomerRow>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all_customers(&self) -> Result<Vec<CustomerRow>> {
        Ok(self.tables.read().await.customers.clone())
    }
}

#[async_trait]
impl ProductStore for InMemorySalesStore {
    async fn insert_product(&self, row: ProductRow) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.has_product(&row.id) {
            return Err(RepositoryError::rejected(
                "products_pkey",
                format!("duplicate product id {}", row.id),
            ));
        }
        tables.products.push(row);
        Ok(())
    }

    async fn update_product(&self, row: ProductRow) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.products.iter_mut().find(|p| p.id == row.id) {
            Some(existing) => {
                *existing = row;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_product(&self, id: &str) -> Result<Option<ProductRow>> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all_products(&self) -> Result<Vec<ProductRow>> {
        Ok(self.tables.read().await.products.clone())
    }
}

#[async_trait]
impl OrderStore for InMemorySalesStore {
    async fn insert_order(&self, record: OrderRecord) -> Result<()> {
        let mut tables = self.tables.write().await;
        let OrderRecord { order, items } = record;

        if tables.has_order(&order.id) {
            return Err(RepositoryError::rejected(
                "orders_pkey",
                format!("duplicate order id {}", order.id),
            ));
        }
        if !tables.has_customer(&order.customer_id) {
            return Err(RepositoryError::rejected(
                "orders_customer_id_fkey",
                format!("customer {} does not exist", order.customer_id),
            ));
        }
        tables.check_items(&items, Some(order.id.as_str()))?;

        tables.orders.push(order);
        tables.items.extend(items);
        Ok(())
    }

    async fn update_order(&self, row: OrderRow) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if !tables.has_order(&row.id) {
            return Ok(false);
        }
        if !tables.has_customer(&row.customer_id) {
            return Err(RepositoryError::rejected(
                "orders_customer_id_fkey",
                format!("customer {} does not exist", row.customer_id),
            ));
        }
        if let Some(existing) = tables.orders.iter_mut().find(|o| o.id == row.id) {
            existing.customer_id = row.customer_id;
            existing.total = row.total;
        }
        Ok(true)
    }

    async fn find_order(&self, id: &str) -> Result<Option<OrderRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|order| OrderRecord {
                order: order.clone(),
                items: tables.items_of(&order.id),
            }))
    }

    async fn find_all_orders(&self) -> Result<Vec<OrderRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .iter()
            .map(|order| OrderRecord {
                order: order.clone(),
                items: tables.items_of(&order.id),
            })
            .collect())
    }

    async fn delete_items(&self, order_id: &str) -> Result<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.items.len();
        tables.items.retain(|item| item.order_id != order_id);
        Ok((before - tables.items.len()) as u64)
    }

    async fn insert_items(&self, items: Vec<OrderItemRow>) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check_items(&items, None)?;
        tables.items.extend(items);
        Ok(())
    }
}
