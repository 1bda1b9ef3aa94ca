//! Logistics repository contract and SQLite implementation.
//!
//! # Invariants
//! - Saving a logistics item never changes which event owns it; ownership
//!   links are written by the event repository.

use crate::model::logistics::{Logistics, LogisticsId};
use crate::repo::{bool_to_int, ensure_schema_ready, parse_bool, parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const LOGISTICS_COLUMNS: &str =
    "l.uuid AS uuid, l.description AS description, l.unit_price AS unit_price, \
     l.quantity AS quantity, l.reserved AS reserved";

/// Repository interface for logistics items.
pub trait LogisticsRepository {
    /// Inserts or replaces the logistics item keyed by id.
    fn save(&self, logistics: &Logistics) -> RepoResult<Logistics>;
    fn find_by_id(&self, id: LogisticsId) -> RepoResult<Option<Logistics>>;
}

/// SQLite-backed logistics repository.
pub struct SqliteLogisticsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLogisticsRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl LogisticsRepository for SqliteLogisticsRepository<'_> {
    fn save(&self, logistics: &Logistics) -> RepoResult<Logistics> {
        upsert_logistics(self.conn, logistics)?;
        Ok(logistics.clone())
    }

    fn find_by_id(&self, id: LogisticsId) -> RepoResult<Option<Logistics>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {LOGISTICS_COLUMNS} FROM logistics l WHERE l.uuid = ?1;"),
                [id.to_string()],
                |row| Ok(parse_logistics_row(row)),
            )
            .optional()?;

        row.transpose()
    }
}

/// Writes one logistics row. Shared with the event repository cascade.
pub(crate) fn upsert_logistics(conn: &Connection, logistics: &Logistics) -> RepoResult<()> {
    logistics.validate()?;

    conn.execute(
        "INSERT INTO logistics (uuid, description, unit_price, quantity, reserved)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(uuid) DO UPDATE SET
            description = excluded.description,
            unit_price = excluded.unit_price,
            quantity = excluded.quantity,
            reserved = excluded.reserved;",
        params![
            logistics.id.to_string(),
            logistics.description.as_str(),
            logistics.unit_price,
            logistics.quantity,
            bool_to_int(logistics.reserved),
        ],
    )?;

    Ok(())
}

pub(crate) fn parse_logistics_row(row: &Row<'_>) -> RepoResult<Logistics> {
    let uuid_text: String = row.get("uuid")?;
    let logistics = Logistics {
        id: parse_uuid(&uuid_text, "logistics.uuid")?,
        description: row.get("description")?,
        unit_price: row.get("unit_price")?,
        quantity: row.get("quantity")?,
        reserved: parse_bool(row.get("reserved")?, "logistics.reserved")?,
    };
    logistics.validate()?;
    Ok(logistics)
}
