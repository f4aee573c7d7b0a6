//! Repository contract shared by the storage-engine test suites.
//!
//! Every check takes a fresh, empty store and panics on failure.

#![allow(dead_code)]

use domain::{Address, Customer, Order, OrderItem, Product, ValidationError};
use persistence::{
    CustomerRepository, CustomerStore, OrderRepository, OrderStore, ProductRepository,
    ProductStore, Repository, RepositoryError,
};

pub trait SalesStore: CustomerStore + ProductStore + OrderStore + Clone + 'static {}

impl<T: CustomerStore + ProductStore + OrderStore + Clone + 'static> SalesStore for T {}

pub struct Repositories<S> {
    pub customers: CustomerRepository<S>,
    pub products: ProductRepository<S>,
    pub orders: OrderRepository<S>,
}

pub fn repositories<S: SalesStore>(store: S) -> Repositories<S> {
    Repositories {
        customers: CustomerRepository::new(store.clone()),
        products: ProductRepository::new(store.clone()),
        orders: OrderRepository::new(store),
    }
}

pub fn customer(id: &str, n: i32) -> Customer {
    let mut customer = Customer::new(id, format!("Customer {n}")).unwrap();
    let address = Address::new(
        format!("Street {n}"),
        n,
        format!("Zipcode {n}"),
        format!("City {n}"),
    )
    .unwrap();
    customer.change_address(address);
    customer
}

pub fn item(id: &str, product: &Product, quantity: i32) -> OrderItem {
    OrderItem::new(id, product.name(), product.price(), product.id(), quantity)
}

/// Seeds customers "123" and "124" and products "123" (10.0) and "456" (50.0).
pub async fn seed<S: SalesStore>(repos: &Repositories<S>) -> (Product, Product) {
    repos.customers.create(&customer("123", 1)).await.unwrap();
    repos.customers.create(&customer("124", 2)).await.unwrap();

    let product1 = Product::new("123", "Product 1", 10.0).unwrap();
    let product2 = Product::new("456", "Product 2", 50.0).unwrap();
    repos.products.create(&product1).await.unwrap();
    repos.products.create(&product2).await.unwrap();

    (product1, product2)
}

pub async fn create_then_find_order<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, product2) = seed(&repos).await;

    let order = Order::new(
        "123",
        "123",
        vec![item("1", &product1, 2), item("2", &product2, 10)],
    )
    .unwrap();
    repos.orders.create(&order).await.unwrap();

    let found = repos.orders.find("123").await.unwrap();

    assert_eq!(found, order);
    assert_eq!(found.total(), 520.0);
}

pub async fn update_replaces_items<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, _) = seed(&repos).await;

    let order = Order::new("123", "123", vec![item("1", &product1, 2)]).unwrap();
    repos.orders.create(&order).await.unwrap();

    let changed = Order::new(order.id(), order.customer_id(), vec![item("1", &product1, 10)]).unwrap();
    repos.orders.update(&changed).await.unwrap();

    let found = repos.orders.find("123").await.unwrap();
    assert_eq!(found.items().len(), 1);
    assert_eq!(found.items()[0].quantity(), 10);
    assert_eq!(found.total(), 100.0);
    assert_eq!(found, changed);
}

pub async fn update_shrinks_and_moves_items<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, product2) = seed(&repos).await;

    let order = Order::new(
        "123",
        "123",
        vec![item("1", &product1, 2), item("2", &product2, 1)],
    )
    .unwrap();
    repos.orders.create(&order).await.unwrap();

    let changed = Order::new("123", "124", vec![item("3", &product2, 4)]).unwrap();
    repos.orders.update(&changed).await.unwrap();

    let found = repos.orders.find("123").await.unwrap();
    assert_eq!(found.customer_id(), "124");
    assert_eq!(found.items().len(), 1);
    assert_eq!(found.items()[0].id(), "3");
    assert_eq!(found.total(), 200.0);
}

pub async fn update_leaves_other_orders_alone<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, product2) = seed(&repos).await;

    let order1 = Order::new("123", "123", vec![item("1", &product1, 2)]).unwrap();
    let order2 = Order::new("124", "124", vec![item("2", &product2, 3)]).unwrap();
    repos.orders.create(&order1).await.unwrap();
    repos.orders.create(&order2).await.unwrap();

    let changed = Order::new("123", "123", vec![item("1", &product1, 7)]).unwrap();
    repos.orders.update(&changed).await.unwrap();

    assert_eq!(repos.orders.find("124").await.unwrap(), order2);
}

/// Reusing another order's item id fails the re-insert after the old items
/// are already gone. Nothing is rolled back: the header keeps the new
/// customer and the order no longer loads.
pub async fn failed_update_leaves_order_without_items<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, product2) = seed(&repos).await;

    let order1 = Order::new("123", "123", vec![item("1", &product1, 2)]).unwrap();
    let order2 = Order::new("124", "124", vec![item("2", &product2, 3)]).unwrap();
    repos.orders.create(&order1).await.unwrap();
    repos.orders.create(&order2).await.unwrap();

    let clashing = Order::new("123", "124", vec![item("2", &product1, 5)]).unwrap();
    let result = repos.orders.update(&clashing).await;
    assert!(matches!(result, Err(RepositoryError::Persistence { .. })));

    let record = repos.orders.store().find_order("123").await.unwrap().unwrap();
    assert_eq!(record.order.customer_id, "124");
    assert!(record.items.is_empty());

    assert!(matches!(
        repos.orders.find("123").await,
        Err(RepositoryError::Validation(ValidationError::NoItems))
    ));
    assert_eq!(repos.orders.find("124").await.unwrap(), order2);
}

/// Orders with more item rows than one bulk statement can carry.
pub async fn large_order_round_trip<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, _) = seed(&repos).await;

    let items = (0..12_000)
        .map(|n| item(&format!("a{n}"), &product1, 1))
        .collect();
    let order = Order::new("123", "123", items).unwrap();
    repos.orders.create(&order).await.unwrap();

    let found = repos.orders.find("123").await.unwrap();
    assert_eq!(found.items().len(), 12_000);
    assert_eq!(found.total(), 120_000.0);

    let items = (0..11_000)
        .map(|n| item(&format!("b{n}"), &product1, 2))
        .collect();
    let changed = Order::new("123", "123", items).unwrap();
    repos.orders.update(&changed).await.unwrap();

    let found = repos.orders.find("123").await.unwrap();
    assert_eq!(found.items().len(), 11_000);
    assert_eq!(found, changed);
}

pub async fn update_missing_order_fails<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, _) = seed(&repos).await;

    let order = Order::new("999", "123", vec![item("1", &product1, 1)]).unwrap();
    let result = repos.orders.update(&order).await;

    assert!(matches!(
        result,
        Err(RepositoryError::NotFound { entity: "Order", ref id }) if id == "999"
    ));
}

pub async fn find_missing_order_fails<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let result = repos.orders.find("nope").await;
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

pub async fn find_all_orders<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, product2) = seed(&repos).await;

    let order1 = Order::new(
        "123",
        "123",
        vec![item("1", &product1, 2), item("2", &product2, 10)],
    )
    .unwrap();
    let order2 = Order::new("124", "124", vec![item("3", &product2, 15)]).unwrap();
    repos.orders.create(&order1).await.unwrap();
    repos.orders.create(&order2).await.unwrap();

    let orders = repos.orders.find_all().await.unwrap();

    assert_eq!(orders.len(), 2);
    assert!(orders.contains(&order1));
    assert!(orders.contains(&order2));
}

pub async fn order_for_unknown_customer_is_rejected<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, _) = seed(&repos).await;

    let order = Order::new("123", "ghost", vec![item("1", &product1, 1)]).unwrap();
    let result = repos.orders.create(&order).await;

    assert!(matches!(result, Err(RepositoryError::Persistence { .. })));
    assert!(matches!(
        repos.orders.find("123").await,
        Err(RepositoryError::NotFound { .. })
    ));
}

pub async fn order_for_unknown_product_is_rejected<S: SalesStore>(store: S) {
    let repos = repositories(store);
    seed(&repos).await;

    let ghost = Product::new("ghost", "Ghost", 1.0).unwrap();
    let order = Order::new("123", "123", vec![item("1", &ghost, 1)]).unwrap();
    let result = repos.orders.create(&order).await;

    assert!(matches!(result, Err(RepositoryError::Persistence { .. })));
    assert!(repos.orders.find_all().await.unwrap().is_empty());
}

pub async fn duplicate_order_is_rejected<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (product1, _) = seed(&repos).await;

    let order = Order::new("123", "123", vec![item("1", &product1, 1)]).unwrap();
    repos.orders.create(&order).await.unwrap();

    let again = Order::new("123", "123", vec![item("9", &product1, 1)]).unwrap();
    let result = repos.orders.create(&again).await;

    assert!(matches!(result, Err(RepositoryError::Persistence { .. })));
    assert_eq!(repos.orders.find("123").await.unwrap(), order);
}

pub async fn customer_round_trip<S: SalesStore>(store: S) {
    let repos = repositories(store);

    let mut active = customer("123", 1);
    active.activate().unwrap();
    active.add_reward_points(20);
    let plain = Customer::new("124", "Customer 2").unwrap();

    repos.customers.create(&active).await.unwrap();
    repos.customers.create(&plain).await.unwrap();

    assert_eq!(repos.customers.find("123").await.unwrap(), active);
    assert_eq!(repos.customers.find("124").await.unwrap(), plain);

    let all = repos.customers.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
}

pub async fn customer_update<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let mut stored = customer("123", 1);
    repos.customers.create(&stored).await.unwrap();

    stored.change_name("Customer Renamed").unwrap();
    stored.change_address(Address::new("Street 9", 9, "Zipcode 9", "City 9").unwrap());
    stored.activate().unwrap();
    repos.customers.update(&stored).await.unwrap();

    let found = repos.customers.find("123").await.unwrap();
    assert_eq!(found.name(), "Customer Renamed");
    assert_eq!(
        found.address().map(ToString::to_string).as_deref(),
        Some("Street 9, 9, Zipcode 9, City 9")
    );
    assert!(found.is_active());

    let missing = Customer::new("999", "Nobody").unwrap();
    assert!(matches!(
        repos.customers.update(&missing).await,
        Err(RepositoryError::NotFound { entity: "Customer", .. })
    ));
    assert!(matches!(
        repos.customers.find("999").await,
        Err(RepositoryError::NotFound { .. })
    ));
}

pub async fn product_round_trip_and_update<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (mut product1, product2) = seed(&repos).await;

    assert_eq!(repos.products.find("123").await.unwrap(), product1);

    product1.change_name("Product 1b").unwrap();
    product1.change_price(15.0);
    repos.products.update(&product1).await.unwrap();

    let found = repos.products.find("123").await.unwrap();
    assert_eq!(found.name(), "Product 1b");
    assert_eq!(found.price(), 15.0);

    let all = repos.products.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.contains(&product2));
}

pub async fn marked_down_product_fails_to_load<S: SalesStore>(store: S) {
    let repos = repositories(store);
    let (mut product1, _) = seed(&repos).await;

    product1.change_price(-1.0);
    repos.products.update(&product1).await.unwrap();

    assert!(matches!(
        repos.products.find("123").await,
        Err(RepositoryError::Validation(ValidationError::InvalidPrice))
    ));
}

pub async fn duplicate_customer_is_rejected<S: SalesStore>(store: S) {
    let repos = repositories(store);
    repos.customers.create(&customer("123", 1)).await.unwrap();

    let result = repos.customers.create(&customer("123", 2)).await;
    assert!(matches!(result, Err(RepositoryError::Persistence { .. })));
}
