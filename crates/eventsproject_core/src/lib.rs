//! Core domain logic for the events project.
//! This crate is the single source of truth for event, participant and
//! logistics invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId};
pub use model::logistics::{Logistics, LogisticsId};
pub use model::participant::{Participant, ParticipantId, Role};
pub use model::ModelValidationError;
pub use repo::event_repo::{EventRepository, ParticipantFilter, SqliteEventRepository};
pub use repo::in_memory::{
    InMemoryEventRepository, InMemoryLogisticsRepository, InMemoryParticipantRepository,
};
pub use repo::logistics_repo::{LogisticsRepository, SqliteLogisticsRepository};
pub use repo::participant_repo::{ParticipantRepository, SqliteParticipantRepository};
pub use repo::{RepoError, RepoResult};
pub use service::cost::compute_cost;
pub use service::event_service::{EventService, EventServiceError, EventServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
