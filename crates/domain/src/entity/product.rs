//! Product entity.

use serde::Serialize;

use crate::ValidationError;

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: String,
    name: String,
    price: f64,
}

impl Product {
    /// Creates a product, checking id, name and price (> 0) in that order.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Self, ValidationError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Renames the product. The current name is kept if the new one is empty.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        self.name = name;
        Ok(())
    }

    /// Sets a new price.
    ///
    /// Unlike [`Product::new`], any value is accepted here, including zero
    /// and negative markdowns.
    pub fn change_price(&mut self, price: f64) {
        self.price = price;
    }
}
