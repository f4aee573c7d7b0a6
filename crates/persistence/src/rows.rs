//! Relational row shapes and their mapping to domain entities.
//!
//! Rows are plain records: they carry no invariants of their own. Turning a
//! row back into an entity always goes through the entity constructor, so a
//! corrupt row surfaces as the same [`ValidationError`] a fresh construction
//! would raise.

use domain::{Address, Customer, Order, OrderItem, Product, ValidationError};

/// A row of the `customers` table. Address columns are all set or all null.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub street: Option<String>,
    pub number: Option<i32>,
    pub zipcode: Option<String>,
    pub city: Option<String>,
    pub active: bool,
    pub reward_points: u64,
}

impl CustomerRow {
    pub fn from_customer(customer: &Customer) -> Self {
        let address = customer.address();
        Self {
            id: customer.id().to_owned(),
            name: customer.name().to_owned(),
            street: address.map(|a| a.street().to_owned()),
            number: address.map(Address::number),
            zipcode: address.map(|a| a.zip().to_owned()),
            city: address.map(|a| a.city().to_owned()),
            active: customer.is_active(),
            reward_points: customer.reward_points(),
        }
    }

    pub fn into_customer(self) -> Result<Customer, ValidationError> {
        let mut customer = Customer::new(self.id, self.name)?;

        // A partially populated address is rebuilt so the missing field is
        // reported by the address checks.
        let has_address = self.street.is_some()
            || self.number.is_some()
            || self.zipcode.is_some()
            || self.city.is_some();
        if has_address {
            let address = Address::new(
                self.street.unwrap_or_default(),
                self.number.unwrap_or_default(),
                self.zipcode.unwrap_or_default(),
                self.city.unwrap_or_default(),
            )?;
            customer.change_address(address);
        }

        if self.active {
            customer.activate()?;
        }
        customer.add_reward_points(self.reward_points);

        Ok(customer)
    }
}

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl ProductRow {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id().to_owned(),
            name: product.name().to_owned(),
            price: product.price(),
        }
    }

    pub fn into_product(self) -> Result<Product, ValidationError> {
        Product::new(self.id, self.name, self.price)
    }
}

/// A row of the `orders` table.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: String,
    pub customer_id: String,
    pub total: f64,
}

/// A row of the `order_items` table, keyed to its order by `order_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRow {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

impl OrderItemRow {
    pub fn from_item(order_id: &str, item: &OrderItem) -> Self {
        Self {
            id: item.id().to_owned(),
            order_id: order_id.to_owned(),
            product_id: item.product_id().to_owned(),
            name: item.name().to_owned(),
            price: item.price(),
            quantity: item.quantity(),
        }
    }

    fn into_item(self) -> OrderItem {
        OrderItem::new(self.id, self.name, self.price, self.product_id, self.quantity)
    }
}

/// An order row together with its item rows.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order: OrderRow,
    pub items: Vec<OrderItemRow>,
}

impl OrderRecord {
    pub fn from_order(order: &Order) -> Self {
        Self {
            order: OrderRow {
                id: order.id().to_owned(),
                customer_id: order.customer_id().to_owned(),
                total: order.total(),
            },
            items: item_rows(order),
        }
    }

    /// Rebuilds the aggregate. The stored total is ignored; `Order::new`
    /// derives it again from the items.
    pub fn into_order(self) -> Result<Order, ValidationError> {
        let items = self.items.into_iter().map(OrderItemRow::into_item).collect();
        Order::new(self.order.id, self.order.customer_id, items)
    }
}

/// Builds one item row per item of `order`, in item order.
pub fn item_rows(order: &Order) -> Vec<OrderItemRow> {
    order
        .items()
        .iter()
        .map(|item| OrderItemRow::from_item(order.id(), item))
        .collect()
}
