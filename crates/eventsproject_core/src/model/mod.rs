//! Domain model for events, participants and logistics items.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep relationship sets (event logistics, event participants) in one place.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Relationship sets use id-based set semantics: re-inserting is a no-op.
//! - Numeric fields written to storage must be finite.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event;
pub mod logistics;
pub mod participant;

/// Model validation failure raised before persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Logistics unit price is NaN or infinite.
    NonFiniteUnitPrice(f64),
    /// Event cost is NaN or infinite.
    NonFiniteCost(f64),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteUnitPrice(value) => {
                write!(f, "logistics unit price must be finite, got {value}")
            }
            Self::NonFiniteCost(value) => write!(f, "event cost must be finite, got {value}"),
        }
    }
}

impl Error for ModelValidationError {}
