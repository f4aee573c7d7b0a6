//! Domain services operating on several entities at once.

use crate::Product;

/// Catalog-wide product operations.
pub struct ProductService;

impl ProductService {
    /// Raises every product's price by `percentage` percent.
    ///
    /// Negative percentages lower prices. Goes through
    /// [`Product::change_price`], so the result is not checked for positivity.
    pub fn increase_prices(products: &mut [Product], percentage: f64) {
        for product in products.iter_mut() {
            let price = product.price();
            product.change_price(price + price * percentage / 100.0);
        }
        tracing::debug!(count = products.len(), percentage, "product prices changed");
    }
}
