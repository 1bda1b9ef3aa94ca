//! Participant repository contract and SQLite implementation.

use crate::model::participant::{Participant, ParticipantId, Role};
use crate::repo::{ensure_schema_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for participants.
pub trait ParticipantRepository {
    /// Inserts or replaces the participant keyed by id.
    fn save(&self, participant: &Participant) -> RepoResult<Participant>;
    fn find_by_id(&self, id: ParticipantId) -> RepoResult<Option<Participant>>;
}

/// SQLite-backed participant repository.
pub struct SqliteParticipantRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParticipantRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ParticipantRepository for SqliteParticipantRepository<'_> {
    fn save(&self, participant: &Participant) -> RepoResult<Participant> {
        self.conn.execute(
            "INSERT INTO participants (uuid, last_name, first_name, role)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(uuid) DO UPDATE SET
                last_name = excluded.last_name,
                first_name = excluded.first_name,
                role = excluded.role;",
            params![
                participant.id.to_string(),
                participant.last_name.as_str(),
                participant.first_name.as_str(),
                participant.role.map(Role::as_str),
            ],
        )?;

        Ok(participant.clone())
    }

    fn find_by_id(&self, id: ParticipantId) -> RepoResult<Option<Participant>> {
        let row = self
            .conn
            .query_row(
                "SELECT uuid, last_name, first_name, role
                 FROM participants
                 WHERE uuid = ?1;",
                [id.to_string()],
                |row| Ok(parse_participant_row(row)),
            )
            .optional()?;

        row.transpose()
    }
}

fn parse_participant_row(row: &Row<'_>) -> RepoResult<Participant> {
    let uuid_text: String = row.get("uuid")?;
    let role = match row.get::<_, Option<String>>("role")? {
        Some(value) => Some(Role::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid role `{value}` in participants.role"))
        })?),
        None => None,
    };

    Ok(Participant {
        id: parse_uuid(&uuid_text, "participants.uuid")?,
        last_name: row.get("last_name")?,
        first_name: row.get("first_name")?,
        role,
    })
}
