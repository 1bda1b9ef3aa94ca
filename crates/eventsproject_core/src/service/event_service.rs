//! Event use-case service.
//!
//! # Responsibility
//! - Register participants and attach them to events.
//! - Attach logistics items to events looked up by description.
//! - List logistics of events starting within a date range.
//! - Recompute and persist event costs for events selected by participant.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - An unknown event description fails with `EventNotFound` before any save.
//! - Steps of one operation are not wrapped in a shared transaction.

use crate::model::event::Event;
use crate::model::logistics::Logistics;
use crate::model::participant::{Participant, ParticipantId};
use crate::repo::event_repo::{EventRepository, ParticipantFilter};
use crate::repo::logistics_repo::LogisticsRepository;
use crate::repo::participant_repo::ParticipantRepository;
use crate::repo::RepoError;
use crate::service::cost::compute_cost;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type EventServiceResult<T> = Result<T, EventServiceError>;

/// Errors from event service operations.
#[derive(Debug)]
pub enum EventServiceError {
    /// No event carries the requested description.
    EventNotFound(String),
    /// Referenced participant does not exist.
    ParticipantNotFound(ParticipantId),
    /// Persistence-layer failure, propagated unchanged.
    Repo(RepoError),
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventNotFound(description) => write!(f, "event not found: `{description}`"),
            Self::ParticipantNotFound(id) => write!(f, "participant not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EventServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Event service facade over the three entity repositories.
pub struct EventService<E, P, L>
where
    E: EventRepository,
    P: ParticipantRepository,
    L: LogisticsRepository,
{
    events: E,
    participants: P,
    logistics: L,
}

impl<E, P, L> EventService<E, P, L>
where
    E: EventRepository,
    P: ParticipantRepository,
    L: LogisticsRepository,
{
    pub fn new(events: E, participants: P, logistics: L) -> Self {
        Self {
            events,
            participants,
            logistics,
        }
    }

    /// Persists a participant and returns what the repository stored.
    pub fn add_participant(&self, participant: &Participant) -> EventServiceResult<Participant> {
        let saved = self.participants.save(participant)?;
        info!(
            "event=participant_add module=service status=ok participant_id={}",
            saved.id
        );
        Ok(saved)
    }

    /// Links an existing participant to `event` and saves the event.
    ///
    /// Linking an already linked participant is a no-op apart from the save.
    pub fn add_participant_to_event(
        &self,
        mut event: Event,
        participant_id: ParticipantId,
    ) -> EventServiceResult<Event> {
        if self.participants.find_by_id(participant_id)?.is_none() {
            warn!(
                "event=participant_link module=service status=error error_code=participant_not_found participant_id={participant_id}"
            );
            return Err(EventServiceError::ParticipantNotFound(participant_id));
        }

        event.add_participant(participant_id);
        let saved = self.events.save(&event)?;
        info!(
            "event=participant_link module=service status=ok event_id={} participant_id={participant_id}",
            saved.id
        );
        Ok(saved)
    }

    /// Saves an event after checking that every linked participant exists.
    pub fn add_event_with_participants(&self, event: &Event) -> EventServiceResult<Event> {
        for participant_id in &event.participants {
            if self.participants.find_by_id(*participant_id)?.is_none() {
                return Err(EventServiceError::ParticipantNotFound(*participant_id));
            }
        }

        let saved = self.events.save(event)?;
        info!(
            "event=event_add module=service status=ok event_id={} participants={}",
            saved.id,
            saved.participants.len()
        );
        Ok(saved)
    }

    /// Attaches `logistics` to the event described by `event_description`.
    ///
    /// # Contract
    /// - Fails with `EventNotFound` when no event matches; nothing is saved.
    /// - Saves the logistics item once, then the owning event once.
    /// - An item already in the event's set is replaced by the saved value,
    ///   so the event save never writes back a stale copy.
    /// - Returns the saved logistics item.
    pub fn add_logistics_to_event(
        &self,
        logistics: &Logistics,
        event_description: &str,
    ) -> EventServiceResult<Logistics> {
        let Some(mut event) = self.events.find_by_description(event_description)? else {
            warn!(
                "event=logistics_attach module=service status=error error_code=event_not_found"
            );
            return Err(EventServiceError::EventNotFound(event_description.to_string()));
        };

        let saved = self.logistics.save(logistics)?;
        if !event.upsert_logistics(saved.clone()) {
            debug!(
                "event=logistics_attach module=service status=replaced event_id={} logistics_id={}",
                event.id, saved.id
            );
        }
        self.events.save(&event)?;
        info!(
            "event=logistics_attach module=service status=ok event_id={} logistics_id={}",
            event.id, saved.id
        );
        Ok(saved)
    }

    /// Returns every logistics item of events starting in `[start, end]`.
    ///
    /// Reserved and non-reserved items are both included. The result is empty
    /// when no event matches; ordering is not part of the contract.
    pub fn logistics_between_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EventServiceResult<Vec<Logistics>> {
        let events = self.events.find_by_start_date_between(start, end)?;
        let items: Vec<Logistics> = events
            .into_iter()
            .flat_map(|event| event.logistics)
            .collect();
        debug!(
            "event=logistics_between_dates module=service status=ok start={start} end={end} items={}",
            items.len()
        );
        Ok(items)
    }

    /// Recomputes and saves the cost of every event matching `filter`.
    ///
    /// Returns the number of events saved. Stops at the first repository
    /// error; events saved before it keep their new cost.
    pub fn compute_and_persist_costs(
        &self,
        filter: &ParticipantFilter,
    ) -> EventServiceResult<usize> {
        let started_at = Instant::now();
        let events = self.events.find_by_participant(filter)?;

        let mut updated = 0;
        for mut event in events {
            event.cost = compute_cost(&event.logistics);
            self.events.save(&event)?;
            debug!(
                "event=cost_recompute module=service status=ok event_id={} cost={}",
                event.id, event.cost
            );
            updated += 1;
        }

        info!(
            "event=cost_recompute_batch module=service status=ok role={} events={updated} duration_ms={}",
            filter.role.as_str(),
            started_at.elapsed().as_millis()
        );
        Ok(updated)
    }

    /// [`Self::compute_and_persist_costs`] with the default organizer filter.
    pub fn compute_and_persist_organizer_costs(&self) -> EventServiceResult<usize> {
        self.compute_and_persist_costs(&ParticipantFilter::default_organizer())
    }
}
