//! In-memory repositories.
//!
//! # Responsibility
//! - Exercise services without a database.
//! - Record every `save` call so callers can check what was persisted.
//! - Simulate persistence failures through an offline switch.
//!
//! # Invariants
//! - Cloning a repository yields a handle to the same store.
//! - `seed` writes bypass the save log and the offline switch.
//! - Lookup ordering mirrors the SQLite implementation.

use crate::model::event::{Event, EventId};
use crate::model::logistics::{Logistics, LogisticsId};
use crate::model::participant::{Participant, ParticipantId};
use crate::repo::event_repo::{EventRepository, ParticipantFilter};
use crate::repo::logistics_repo::LogisticsRepository;
use crate::repo::participant_repo::ParticipantRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Rows plus a log of saved values for one entity kind.
struct Store<T> {
    rows: Vec<T>,
    saved: Vec<T>,
    offline: bool,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            saved: Vec::new(),
            offline: false,
        }
    }
}

/// Shared handle with id-keyed upsert.
struct Shared<T> {
    name: &'static str,
    inner: Arc<Mutex<Store<T>>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Shared<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(Store::default())),
        }
    }

    fn raw_lock(&self) -> RepoResult<MutexGuard<'_, Store<T>>> {
        self.inner
            .lock()
            .map_err(|_| RepoError::Unavailable(format!("{} store lock poisoned", self.name)))
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Store<T>>> {
        let guard = self.raw_lock()?;
        if guard.offline {
            return Err(RepoError::Unavailable(format!("{} repository offline", self.name)));
        }
        Ok(guard)
    }

    fn upsert(rows: &mut Vec<T>, value: T, id_of: impl Fn(&T) -> Uuid) {
        let id = id_of(&value);
        match rows.iter_mut().find(|row| id_of(&**row) == id) {
            Some(row) => *row = value,
            None => rows.push(value),
        }
    }

    fn save(&self, value: &T, id_of: impl Fn(&T) -> Uuid) -> RepoResult<T> {
        let mut guard = self.lock()?;
        guard.saved.push(value.clone());
        Self::upsert(&mut guard.rows, value.clone(), id_of);
        Ok(value.clone())
    }

    fn seed(&self, value: T, id_of: impl Fn(&T) -> Uuid) -> RepoResult<()> {
        let mut guard = self.raw_lock()?;
        Self::upsert(&mut guard.rows, value, id_of);
        Ok(())
    }

    fn find(&self, id: Uuid, id_of: impl Fn(&T) -> Uuid) -> RepoResult<Option<T>> {
        let guard = self.lock()?;
        Ok(guard.rows.iter().find(|row| id_of(*row) == id).cloned())
    }

    fn set_offline(&self, offline: bool) -> RepoResult<()> {
        self.raw_lock()?.offline = offline;
        Ok(())
    }

    fn saved(&self) -> RepoResult<Vec<T>> {
        Ok(self.raw_lock()?.saved.clone())
    }

    fn rows(&self) -> RepoResult<Vec<T>> {
        Ok(self.raw_lock()?.rows.clone())
    }
}

macro_rules! shared_accessors {
    ($entity:ty, $id_of:expr) => {
        /// Inserts a row without recording a save call.
        pub fn seed(&self, value: $entity) -> RepoResult<()> {
            self.store.seed(value, $id_of)
        }

        /// Makes every trait call fail with `RepoError::Unavailable`.
        pub fn set_offline(&self, offline: bool) -> RepoResult<()> {
            self.store.set_offline(offline)
        }

        /// Values passed to `save`, in call order.
        pub fn saved(&self) -> RepoResult<Vec<$entity>> {
            self.store.saved()
        }

        /// Number of `save` calls so far.
        pub fn save_count(&self) -> RepoResult<usize> {
            Ok(self.store.saved()?.len())
        }

        /// Current stored rows, in insertion order.
        pub fn rows(&self) -> RepoResult<Vec<$entity>> {
            self.store.rows()
        }
    };
}

fn participant_id(value: &Participant) -> ParticipantId {
    value.id
}

fn logistics_id(value: &Logistics) -> LogisticsId {
    value.id
}

fn event_id(value: &Event) -> EventId {
    value.id
}

/// In-memory participant store.
#[derive(Clone)]
pub struct InMemoryParticipantRepository {
    store: Shared<Participant>,
}

impl Default for InMemoryParticipantRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self {
            store: Shared::new("participant"),
        }
    }

    shared_accessors!(Participant, participant_id);
}

impl ParticipantRepository for InMemoryParticipantRepository {
    fn save(&self, participant: &Participant) -> RepoResult<Participant> {
        self.store.save(participant, participant_id)
    }

    fn find_by_id(&self, id: ParticipantId) -> RepoResult<Option<Participant>> {
        self.store.find(id, participant_id)
    }
}

/// In-memory logistics store.
#[derive(Clone)]
pub struct InMemoryLogisticsRepository {
    store: Shared<Logistics>,
}

impl Default for InMemoryLogisticsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogisticsRepository {
    pub fn new() -> Self {
        Self {
            store: Shared::new("logistics"),
        }
    }

    shared_accessors!(Logistics, logistics_id);
}

impl LogisticsRepository for InMemoryLogisticsRepository {
    fn save(&self, logistics: &Logistics) -> RepoResult<Logistics> {
        self.store.save(logistics, logistics_id)
    }

    fn find_by_id(&self, id: LogisticsId) -> RepoResult<Option<Logistics>> {
        self.store.find(id, logistics_id)
    }
}

/// In-memory event store.
///
/// Participant lookups resolve ids through the participant store handed to
/// [`InMemoryEventRepository::with_participants`].
#[derive(Clone)]
pub struct InMemoryEventRepository {
    store: Shared<Event>,
    participants: InMemoryParticipantRepository,
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::with_participants(InMemoryParticipantRepository::new())
    }

    pub fn with_participants(participants: InMemoryParticipantRepository) -> Self {
        Self {
            store: Shared::new("event"),
            participants,
        }
    }

    shared_accessors!(Event, event_id);

    fn sorted_matching(&self, keep: impl Fn(&Event) -> bool) -> RepoResult<Vec<Event>> {
        let guard = self.store.lock()?;
        let mut events: Vec<Event> = guard.rows.iter().filter(|e| keep(*e)).cloned().collect();
        events.sort_by(|a, b| (a.start_date, a.id).cmp(&(b.start_date, b.id)));
        Ok(events)
    }
}

impl EventRepository for InMemoryEventRepository {
    fn save(&self, event: &Event) -> RepoResult<Event> {
        self.store.save(event, event_id)
    }

    fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>> {
        self.store.find(id, event_id)
    }

    fn find_by_description(&self, description: &str) -> RepoResult<Option<Event>> {
        let events = self.sorted_matching(|event| event.description == description)?;
        Ok(events.into_iter().next())
    }

    fn find_by_start_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Event>> {
        self.sorted_matching(|event| start <= event.start_date && event.start_date <= end)
    }

    fn find_by_participant(&self, filter: &ParticipantFilter) -> RepoResult<Vec<Event>> {
        let matching: Vec<ParticipantId> = self
            .participants
            .store
            .lock()?
            .rows
            .iter()
            .filter(|p| {
                p.last_name == filter.last_name
                    && p.first_name == filter.first_name
                    && p.role == Some(filter.role)
            })
            .map(|p| p.id)
            .collect();

        self.sorted_matching(|event| event.participants.iter().any(|id| matching.contains(id)))
    }
}
