//! Customer address value object.

use serde::Serialize;

use crate::ValidationError;

/// A postal address.
///
/// Immutable once built; every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    street: String,
    number: i32,
    zip: String,
    city: String,
}

impl Address {
    /// Creates an address, checking street, number, zip and city in that order.
    pub fn new(
        street: impl Into<String>,
        number: i32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.street.is_empty() {
            return Err(ValidationError::StreetRequired);
        }
        if self.number == 0 {
            return Err(ValidationError::NumberRequired);
        }
        if self.zip.is_empty() {
            return Err(ValidationError::ZipRequired);
        }
        if self.city.is_empty() {
            return Err(ValidationError::CityRequired);
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.street, self.number, self.zip, self.city
        )
    }
}
