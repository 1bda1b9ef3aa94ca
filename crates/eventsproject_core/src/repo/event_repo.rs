//! Event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist events together with their logistics and participant links.
//! - Serve the lookups used by the event service: exact description,
//!   inclusive start-date range and participant name/role.
//!
//! # Invariants
//! - `save` replaces the event's link rows in one transaction.
//! - A logistics item belongs to at most one event; saving it under another
//!   event moves it.
//! - Link order is preserved on read-back.

use crate::model::event::{Event, EventId};
use crate::model::participant::{ParticipantId, Role};
use crate::repo::logistics_repo::{parse_logistics_row, upsert_logistics, LOGISTICS_COLUMNS};
use crate::repo::{ensure_schema_ready, parse_uuid, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Params, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    e.uuid AS uuid,
    e.description AS description,
    e.start_date AS start_date,
    e.end_date AS end_date,
    e.cost AS cost
FROM events e";

/// Exact-match participant criteria used to select events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantFilter {
    pub last_name: String,
    pub first_name: String,
    pub role: Role,
}

impl ParticipantFilter {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>, role: Role) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            role,
        }
    }

    /// Organizer whose events get their cost recomputed by default.
    pub fn default_organizer() -> Self {
        Self::new("Tounsi", "Ahmed", Role::Organizer)
    }
}

/// Repository interface for events.
pub trait EventRepository {
    /// Inserts or replaces the event, its owned logistics and its links.
    fn save(&self, event: &Event) -> RepoResult<Event>;
    fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>>;
    /// First event whose description matches exactly.
    fn find_by_description(&self, description: &str) -> RepoResult<Option<Event>>;
    /// Events with `start <= start_date <= end`.
    fn find_by_start_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Event>>;
    /// Events linked to at least one participant matching the filter.
    fn find_by_participant(&self, filter: &ParticipantFilter) -> RepoResult<Vec<Event>>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_events<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        for event in &mut events {
            self.load_links(event)?;
        }

        Ok(events)
    }

    fn load_links(&self, event: &mut Event) -> RepoResult<()> {
        let event_uuid = event.id.to_string();

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LOGISTICS_COLUMNS}
             FROM event_logistics el
             JOIN logistics l ON l.uuid = el.logistics_uuid
             WHERE el.event_uuid = ?1
             ORDER BY el.rowid ASC;"
        ))?;
        let mut rows = stmt.query([event_uuid.as_str()])?;
        while let Some(row) = rows.next()? {
            event.logistics.push(parse_logistics_row(row)?);
        }

        let mut stmt = self.conn.prepare(
            "SELECT participant_uuid
             FROM event_participants
             WHERE event_uuid = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([event_uuid.as_str()])?;
        while let Some(row) = rows.next()? {
            let value: String = row.get(0)?;
            let participant_id: ParticipantId =
                parse_uuid(&value, "event_participants.participant_uuid")?;
            event.participants.push(participant_id);
        }

        Ok(())
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn save(&self, event: &Event) -> RepoResult<Event> {
        event.validate()?;

        let event_uuid = event.id.to_string();
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO events (uuid, description, start_date, end_date, cost)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(uuid) DO UPDATE SET
                description = excluded.description,
                start_date = excluded.start_date,
                end_date = excluded.end_date,
                cost = excluded.cost;",
            params![
                event_uuid.as_str(),
                event.description.as_str(),
                event.start_date,
                event.end_date,
                event.cost,
            ],
        )?;

        tx.execute(
            "DELETE FROM event_logistics WHERE event_uuid = ?1;",
            [event_uuid.as_str()],
        )?;
        for logistics in &event.logistics {
            upsert_logistics(&tx, logistics)?;
            let logistics_uuid = logistics.id.to_string();
            tx.execute(
                "DELETE FROM event_logistics WHERE logistics_uuid = ?1;",
                [logistics_uuid.as_str()],
            )?;
            tx.execute(
                "INSERT INTO event_logistics (logistics_uuid, event_uuid) VALUES (?1, ?2);",
                [logistics_uuid.as_str(), event_uuid.as_str()],
            )?;
        }

        tx.execute(
            "DELETE FROM event_participants WHERE event_uuid = ?1;",
            [event_uuid.as_str()],
        )?;
        for participant_id in &event.participants {
            tx.execute(
                "INSERT INTO event_participants (event_uuid, participant_uuid) VALUES (?1, ?2);",
                [event_uuid.clone(), participant_id.to_string()],
            )?;
        }

        tx.commit()?;
        Ok(event.clone())
    }

    fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>> {
        let events = self.query_events(
            &format!("{EVENT_SELECT_SQL} WHERE e.uuid = ?1;"),
            [id.to_string()],
        )?;
        Ok(events.into_iter().next())
    }

    fn find_by_description(&self, description: &str) -> RepoResult<Option<Event>> {
        let events = self.query_events(
            &format!(
                "{EVENT_SELECT_SQL}
                 WHERE e.description = ?1
                 ORDER BY e.start_date ASC, e.uuid ASC
                 LIMIT 1;"
            ),
            [description],
        )?;
        Ok(events.into_iter().next())
    }

    fn find_by_start_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Event>> {
        self.query_events(
            &format!(
                "{EVENT_SELECT_SQL}
                 WHERE e.start_date BETWEEN ?1 AND ?2
                 ORDER BY e.start_date ASC, e.uuid ASC;"
            ),
            params![start, end],
        )
    }

    fn find_by_participant(&self, filter: &ParticipantFilter) -> RepoResult<Vec<Event>> {
        self.query_events(
            &format!(
                "{EVENT_SELECT_SQL}
                 WHERE EXISTS (
                    SELECT 1
                    FROM event_participants ep
                    JOIN participants p ON p.uuid = ep.participant_uuid
                    WHERE ep.event_uuid = e.uuid
                      AND p.last_name = ?1
                      AND p.first_name = ?2
                      AND p.role = ?3
                 )
                 ORDER BY e.start_date ASC, e.uuid ASC;"
            ),
            params![
                filter.last_name.as_str(),
                filter.first_name.as_str(),
                filter.role.as_str(),
            ],
        )
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let uuid_text: String = row.get("uuid")?;
    let event = Event {
        id: parse_uuid(&uuid_text, "events.uuid")?,
        description: row.get("description")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        cost: row.get("cost")?,
        logistics: Vec::new(),
        participants: Vec::new(),
    };
    event.validate()?;
    Ok(event)
}
