use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

use crate::{
    CustomerRow, CustomerStore, OrderItemRow, OrderRecord, OrderRow, OrderStore, ProductRow,
    ProductStore, RepositoryError, Result,
};

/// Six binds per item row; PostgreSQL allows at most 65 535 per statement.
const ITEMS_PER_INSERT: usize = 1_000;

/// PostgreSQL-backed storage engine.
///
/// Uses the schema in `migrations/001_create_sales_tables.sql`. Rows come
/// back in insertion order.
#[derive(Debug, Clone)]
pub struct PostgresSalesStore {
    pool: PgPool,
}

impl PostgresSalesStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_customer(row: PgRow) -> Result<CustomerRow> {
        let reward_points: i64 = row.try_get("reward_points")?;
        let reward_points =
            u64::try_from(reward_points).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(CustomerRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            street: row.try_get("street")?,
            number: row.try_get("number")?,
            zipcode: row.try_get("zipcode")?,
            city: row.try_get("city")?,
            active: row.try_get("active")?,
            reward_points,
        })
    }

    fn row_to_product(row: PgRow) -> Result<ProductRow> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
        })
    }

    fn row_to_order(row: PgRow) -> Result<OrderRow> {
        Ok(OrderRow {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            total: row.try_get("total")?,
        })
    }

    fn row_to_item(row: PgRow) -> Result<OrderItemRow> {
        Ok(OrderItemRow {
            id: row.try_get("id")?,
            order_id: row.try_get("order_id")?,
            product_id: row.try_get("product_id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
        })
    }

    fn reward_points(row: &CustomerRow) -> Result<i64> {
        i64::try_from(row.reward_points)
            .map_err(|e| RepositoryError::from(sqlx::Error::Encode(Box::new(e))))
    }

    /// Builds one multi-row `INSERT` for `items`.
    fn insert_items_query(items: &[OrderItemRow]) -> QueryBuilder<'_, Postgres> {
        let mut builder = QueryBuilder::new(
            "INSERT INTO order_items (id, order_id, product_id, name, price, quantity) ",
        );
        builder.push_values(items, |mut b, item| {
            b.push_bind(&item.id)
                .push_bind(&item.order_id)
                .push_bind(&item.product_id)
                .push_bind(&item.name)
                .push_bind(item.price)
                .push_bind(item.quantity);
        });
        builder
    }

    /// Inserts `items` in batches of [`ITEMS_PER_INSERT`] on `conn`.
    async fn insert_item_rows(conn: &mut PgConnection, items: &[OrderItemRow]) -> Result<()> {
        for batch in items.chunks(ITEMS_PER_INSERT) {
            Self::insert_items_query(batch)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for PostgresSalesStore {
    async fn insert_customer(&self, row: CustomerRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zipcode)
        .bind(&row.city)
        .bind(row.active)
        .bind(Self::reward_points(&row)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_customer(&self, row: CustomerRow) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zipcode = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zipcode)
        .bind(&row.city)
        .bind(row.active)
        .bind(Self::reward_points(&row)?)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_customer(&self, id: &str) -> Result<Option<CustomerRow>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_customer).transpose()
    }

    async fn find_all_customers(&self) -> Result<Vec<CustomerRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            ORDER BY position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_customer).collect()
    }
}

#[async_trait]
impl ProductStore for PostgresSalesStore {
    async fn insert_product(&self, row: ProductRow) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(&row.id)
            .bind(&row.name)
            .bind(row.price)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_product(&self, row: ProductRow) -> Result<bool> {
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(&row.id)
            .bind(&row.name)
            .bind(row.price)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_product(&self, id: &str) -> Result<Option<ProductRow>> {
        let row: Option<PgRow> = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn find_all_products(&self) -> Result<Vec<ProductRow>> {
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY position ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }
}

#[async_trait]
impl OrderStore for PostgresSalesStore {
    async fn insert_order(&self, record: OrderRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES ($1, $2, $3)")
            .bind(&record.order.id)
            .bind(&record.order.customer_id)
            .bind(record.order.total)
            .execute(&mut *tx)
            .await?;

        Self::insert_item_rows(&mut *tx, &record.items).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_order(&self, row: OrderRow) -> Result<bool> {
        let result = sqlx::query("UPDATE orders SET customer_id = $2, total = $3 WHERE id = $1")
            .bind(&row.id)
            .bind(&row.customer_id)
            .bind(row.total)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_order(&self, id: &str) -> Result<Option<OrderRecord>> {
        let row: Option<PgRow> =
            sqlx::query("SELECT id, customer_id, total FROM orders WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let order = Self::row_to_order(row)?;

        let items = sqlx::query(
            r#"
            SELECT id, order_id, product_id, name, price, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Self::row_to_item)
        .collect::<Result<Vec<_>>>()?;

        Ok(Some(OrderRecord { order, items }))
    }

    async fn find_all_orders(&self) -> Result<Vec<OrderRecord>> {
        let orders = sqlx::query("SELECT id, customer_id, total FROM orders ORDER BY position ASC")
            .fetch_all(&self.pool)
            .await?;

        let item_rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, name, price, quantity
            FROM order_items
            ORDER BY position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<String, Vec<OrderItemRow>> = HashMap::new();
        for row in item_rows {
            let item = Self::row_to_item(row)?;
            items_by_order
                .entry(item.order_id.clone())
                .or_default()
                .push(item);
        }

        orders
            .into_iter()
            .map(|row| {
                let order = Self::row_to_order(row)?;
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                Ok(OrderRecord { order, items })
            })
            .collect()
    }

    async fn delete_items(&self, order_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_items(&self, items: Vec<OrderItemRow>) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        if items.len() <= ITEMS_PER_INSERT {
            Self::insert_items_query(&items)
                .build()
                .execute(&self.pool)
                .await?;
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        Self::insert_item_rows(&mut *tx, &items).await?;
        tx.commit().await?;
        Ok(())
    }
}
