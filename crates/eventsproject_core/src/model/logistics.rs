//! Logistics item domain model.
//!
//! # Invariants
//! - `id` is stable; set membership inside an event is decided by `id`.
//! - `unit_price` must be finite before persistence. Negative prices and
//!   quantities are accepted as-is.

use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable logistics item identifier.
pub type LogisticsId = Uuid;

/// Equipment or service that can be booked for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logistics {
    pub id: LogisticsId,
    pub description: String,
    pub unit_price: f64,
    pub quantity: i64,
    /// Only reserved items count toward an event cost.
    pub reserved: bool,
}

impl Logistics {
    /// Creates a non-reserved logistics item with a generated id.
    pub fn new(description: impl Into<String>, unit_price: f64, quantity: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            unit_price,
            quantity,
            reserved: false,
        }
    }

    /// Builder-style reservation flag.
    pub fn reserved(mut self, reserved: bool) -> Self {
        self.reserved = reserved;
        self
    }

    /// Price contribution of this item regardless of reservation state.
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    /// Checks fields that storage cannot represent faithfully.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if !self.unit_price.is_finite() {
            return Err(ModelValidationError::NonFiniteUnitPrice(self.unit_price));
        }
        Ok(())
    }
}
