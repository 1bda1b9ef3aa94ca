//! Participant domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another participant.
//! - `role` is optional; participants may be registered before they are
//!   given a function within an event.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable participant identifier.
pub type ParticipantId = Uuid;

/// Function a participant holds within an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Organizes the event.
    #[serde(rename = "ORGANISATEUR")]
    Organizer,
    /// Speaks or performs at the event.
    #[serde(rename = "INTERVENANT")]
    Speaker,
    /// Attends the event.
    #[serde(rename = "VISITEUR")]
    Visitor,
}

impl Role {
    /// Stable storage/wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organizer => "ORGANISATEUR",
            Self::Speaker => "INTERVENANT",
            Self::Visitor => "VISITEUR",
        }
    }

    /// Parses a stored role value. Returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ORGANISATEUR" => Some(Self::Organizer),
            "INTERVENANT" => Some(Self::Speaker),
            "VISITEUR" => Some(Self::Visitor),
            _ => None,
        }
    }
}

/// Person taking part in one or more events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub last_name: String,
    pub first_name: String,
    pub role: Option<Role>,
}

impl Participant {
    /// Creates a participant with a generated id and no role.
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), last_name, first_name)
    }

    /// Creates a participant with a caller-provided id.
    pub fn with_id(
        id: ParticipantId,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            last_name: last_name.into(),
            first_name: first_name.into(),
            role: None,
        }
    }

    /// Builder-style role assignment.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}
