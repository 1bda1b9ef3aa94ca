//! Event domain model.
//!
//! # Responsibility
//! - Own the logistics set and participant links of one event.
//! - Keep set insertion idempotent by id.
//!
//! # Invariants
//! - `logistics` is never absent; a new event starts with an empty set.
//! - `cost` is derived from reserved logistics by the cost service and is
//!   never edited by repository code.
//! - `end_date` is not checked against `start_date`.

use crate::model::logistics::{Logistics, LogisticsId};
use crate::model::participant::ParticipantId;
use crate::model::ModelValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable event identifier.
pub type EventId = Uuid;

/// Dated event with its booked logistics and participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Human-readable label; also used as lookup key by the service layer.
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost: f64,
    /// Ordered set keyed by `Logistics::id`.
    pub logistics: Vec<Logistics>,
    /// Ordered set of participant ids.
    pub participants: Vec<ParticipantId>,
}

impl Event {
    /// Creates an event with a generated id, zero cost and empty sets.
    pub fn new(description: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            start_date,
            end_date,
            cost: 0.0,
            logistics: Vec::new(),
            participants: Vec::new(),
        }
    }

    /// Adds a logistics item to the set.
    ///
    /// Returns `false` when an item with the same id is already present, in
    /// which case the set is left untouched.
    pub fn add_logistics(&mut self, logistics: Logistics) -> bool {
        if self.has_logistics(logistics.id) {
            return false;
        }
        self.logistics.push(logistics);
        true
    }

    /// Inserts a logistics item or replaces the copy with the same id.
    ///
    /// Returns `true` when the item was not in the set before. A replaced
    /// item keeps its position.
    pub fn upsert_logistics(&mut self, logistics: Logistics) -> bool {
        match self.logistics.iter_mut().find(|item| item.id == logistics.id) {
            Some(item) => {
                *item = logistics;
                false
            }
            None => {
                self.logistics.push(logistics);
                true
            }
        }
    }

    /// Returns whether the set holds an item with the given id.
    pub fn has_logistics(&self, id: LogisticsId) -> bool {
        self.logistics.iter().any(|item| item.id == id)
    }

    /// Adds a participant link. Returns `false` when already linked.
    pub fn add_participant(&mut self, participant_id: ParticipantId) -> bool {
        if self.participants.contains(&participant_id) {
            return false;
        }
        self.participants.push(participant_id);
        true
    }

    /// Checks the event and every owned logistics item.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if !self.cost.is_finite() {
            return Err(ModelValidationError::NonFiniteCost(self.cost));
        }
        self.logistics.iter().try_for_each(Logistics::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::Event;
    use crate::model::logistics::Logistics;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn add_logistics_is_idempotent_by_id() {
        let mut event = Event::new("expo", day(1), day(2));
        let chairs = Logistics::new("chairs", 2.5, 40);

        assert!(event.add_logistics(chairs.clone()));
        assert!(!event.add_logistics(chairs.clone()));
        assert_eq!(event.logistics, vec![chairs]);
    }

    #[test]
    fn upsert_logistics_replaces_copy_in_place() {
        let mut event = Event::new("expo", day(1), day(2));
        let stage = Logistics::new("stage", 300.0, 1);
        let mut chairs = Logistics::new("chairs", 2.5, 40);
        event.add_logistics(stage.clone());
        assert!(event.upsert_logistics(chairs.clone()));

        chairs.reserved = true;
        assert!(!event.upsert_logistics(chairs.clone()));
        assert_eq!(event.logistics, vec![stage, chairs]);
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let mut event = Event::new("expo", day(1), day(2));
        event.cost = f64::NAN;
        assert!(event.validate().is_err());

        event.cost = 0.0;
        event.add_logistics(Logistics::new("stage", f64::INFINITY, 1));
        assert!(event.validate().is_err());
    }
}
