//! Parcel repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `parcel` table.
//! - Enforce lifecycle guards on every mutation path.
//!
//! # Invariants
//! - Status moves only forward: `registered -> sent -> delivered`.
//! - Address updates and deletes are allowed only while `registered`.
//! - Each guard runs as one conditional UPDATE/DELETE; the current status is
//!   re-read only to explain a zero-row outcome, never to authorize a write.

use crate::db::DbError;
use crate::model::parcel::{Parcel, ParcelNumber, ParcelStatus, UnrecognizedStatus};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcel";

pub type RepoResult<T> = Result<T, RepoError>;

/// Semantic error surface for parcel persistence and lifecycle guards.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ParcelNumber),
    InvalidTransition {
        number: ParcelNumber,
        from: ParcelStatus,
        to: ParcelStatus,
    },
    UnrecognizedStatus(String),
    InvalidState {
        number: ParcelNumber,
        current: ParcelStatus,
    },
    InvalidInitialStatus(ParcelStatus),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::InvalidTransition { number, from, to } => write!(
                f,
                "parcel {number} cannot move from `{from}` to `{to}`; \
                 status only advances registered -> sent -> delivered"
            ),
            Self::UnrecognizedStatus(value) => write!(
                f,
                "unrecognized parcel status `{value}`; expected registered|sent|delivered"
            ),
            Self::InvalidState { number, current } => write!(
                f,
                "parcel {number} is `{current}`; this operation requires status `registered`"
            ),
            Self::InvalidInitialStatus(status) => write!(
                f,
                "new parcels must start as `registered`, got `{status}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted parcel data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<UnrecognizedStatus> for RepoError {
    fn from(value: UnrecognizedStatus) -> Self {
        Self::UnrecognizedStatus(value.0)
    }
}

/// Repository interface for parcel CRUD and lifecycle operations.
pub trait ParcelRepository {
    /// Inserts a new parcel and returns the store-assigned number.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    /// Fetches exactly one parcel by number.
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Returns all parcels owned by `client`; empty when none match.
    fn get_by_client(&self, client: i64) -> RepoResult<Vec<Parcel>>;
    /// Advances the lifecycle status, rejecting out-of-order targets.
    fn set_status(&self, number: ParcelNumber, target: ParcelStatus) -> RepoResult<()>;
    /// Replaces the address while the parcel is still `registered`.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Removes the parcel while it is still `registered`.
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel repository.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Reads the current status, mapping a missing row to `NotFound` and a
    /// corrupt status column to `InvalidData`.
    fn current_status(&self, number: ParcelNumber) -> RepoResult<ParcelStatus> {
        let status: Option<String> = self
            .conn
            .query_row(
                "SELECT status FROM parcel WHERE number = ?1;",
                [number],
                |row| row.get(0),
            )
            .optional()?;

        match status {
            Some(value) => parse_status_column(&value),
            None => Err(RepoError::NotFound(number)),
        }
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        if parcel.status != ParcelStatus::Registered {
            return Err(RepoError::InvalidInitialStatus(parcel.status));
        }

        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                parcel.client,
                parcel.status.as_str(),
                parcel.address,
                parcel.created_at,
            ],
        )?;

        let number = self.conn.last_insert_rowid();
        debug!("event=parcel_add module=repo status=ok number={number} client={}", parcel.client);
        Ok(number)
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"))?;

        let mut rows = stmt.query([number])?;
        match rows.next()? {
            Some(row) => parse_parcel_row(row),
            None => Err(RepoError::NotFound(number)),
        }
    }

    fn get_by_client(&self, client: i64) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE client = ?1;"))?;

        let mut rows = stmt.query([client])?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, target: ParcelStatus) -> RepoResult<()> {
        // The update only matches when the row still holds the sole legal
        // predecessor of `target`, which makes the guard atomic.
        let Some(required) = target.predecessor() else {
            let current = self.current_status(number)?;
            return Err(RepoError::InvalidTransition {
                number,
                from: current,
                to: target,
            });
        };

        let changed = self.conn.execute(
            "UPDATE parcel SET status = ?1 WHERE number = ?2 AND status = ?3;",
            params![target.as_str(), number, required.as_str()],
        )?;

        if changed == 0 {
            let current = self.current_status(number)?;
            return Err(RepoError::InvalidTransition {
                number,
                from: current,
                to: target,
            });
        }

        debug!("event=parcel_set_status module=repo status=ok number={number} target={target}");
        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE parcel SET address = ?1 WHERE number = ?2 AND status = ?3;",
            params![address, number, ParcelStatus::Registered.as_str()],
        )?;

        if changed == 0 {
            let current = self.current_status(number)?;
            return Err(RepoError::InvalidState { number, current });
        }

        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM parcel WHERE number = ?1 AND status = ?2;",
            params![number, ParcelStatus::Registered.as_str()],
        )?;

        if changed == 0 {
            let current = self.current_status(number)?;
            return Err(RepoError::InvalidState { number, current });
        }

        debug!("event=parcel_delete module=repo status=ok number={number}");
        Ok(())
    }
}

fn parse_parcel_row(row: &Row<'_>) -> RepoResult<Parcel> {
    let status_text: String = row.get("status")?;

    Ok(Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status: parse_status_column(&status_text)?,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_status_column(value: &str) -> RepoResult<ParcelStatus> {
    ParcelStatus::from_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid status value `{value}` in parcel.status"))
    })
}
