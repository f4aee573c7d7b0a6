//! Customer entity.

use serde::Serialize;

use super::Address;
use crate::ValidationError;

/// A customer of the store.
///
/// Customers start inactive with no address and zero reward points.
/// Activation requires an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: String,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl Customer {
    /// Creates a customer, checking id then name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0,
        };
        customer.validate()?;
        Ok(customer)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }

    /// Renames the customer. The current name is kept if the new one is empty.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        self.name = name;
        Ok(())
    }

    /// Replaces the customer's address.
    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Marks the customer active.
    ///
    /// Fails with [`ValidationError::AddressRequired`] if no address is set.
    pub fn activate(&mut self) -> Result<(), ValidationError> {
        if self.address.is_none() {
            return Err(ValidationError::AddressRequired);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Adds to the reward point balance.
    pub fn add_reward_points(&mut self, points: u64) {
        self.reward_points = self.reward_points.saturating_add(points);
    }
}
