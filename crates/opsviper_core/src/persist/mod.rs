//! Persistence adapter: durable round-trip of the store snapshot.
//!
//! # Responsibility
//! - Define the backend-agnostic load/save contract over a single durable
//!   record.
//! - Host the SQLite and in-memory backends.
//!
//! # Invariants
//! - `load` never fails: an absent or unparsable record reads as `None`.
//! - `save` never surfaces errors: write failures are logged and swallowed;
//!   the in-memory snapshot stays authoritative.
//! - Every write is a full-snapshot overwrite; the latest save wins.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemorySnapshotStore;
pub use sqlite::{SqliteSnapshotStore, RECORD_KEY};

use crate::model::snapshot::Snapshot;

/// Durable storage for the single snapshot record.
pub trait SnapshotStore {
    /// Reads the durable record. Absent or unparsable records yield `None`;
    /// the caller falls back to the default empty snapshot.
    fn load(&self) -> Option<Snapshot>;

    /// Overwrites the durable record with the full snapshot. Failures are
    /// logged, never returned.
    fn save(&self, snapshot: &Snapshot);

    /// Removes the durable record.
    fn clear(&self);
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Backend bootstrap failure. Only the constructors return this; the trait
/// methods recover locally.
#[derive(Debug)]
pub enum PersistError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
