//! SQLite-backed snapshot record.
//!
//! # Responsibility
//! - Keep the durable record as a single keyed row and overwrite it whole.
//! - Bootstrap the schema before any record access.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`; a database newer
//!   than this build supports is refused at open.
//! - `save` is a single upsert statement, so a write is all-or-nothing.

use log::{debug, error, info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::time::{Duration, Instant};

use super::{PersistError, PersistResult, SnapshotStore};
use crate::model::snapshot::Snapshot;

/// Name of the durable record, carried over from the browser build's
/// storage key so exports stay interchangeable.
pub const RECORD_KEY: &str = "ops-viper-data";

const SCHEMA_VERSION: u32 = 1;
const SCHEMA_SQL: &str = "CREATE TABLE snapshots (
    key TEXT PRIMARY KEY NOT NULL,
    body TEXT NOT NULL,
    saved_at INTEGER NOT NULL
);";

/// Snapshot store over a SQLite database file (or an in-memory database for
/// tests and probes).
pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Opens a database file and prepares the schema.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        Self::from_connection(Connection::open(path)?, "file")
    }

    /// Opens an in-memory database and prepares the schema.
    pub fn open_in_memory() -> PersistResult<Self> {
        Self::from_connection(Connection::open_in_memory()?, "memory")
    }

    fn from_connection(mut conn: Connection, mode: &str) -> PersistResult<Self> {
        let started_at = Instant::now();
        match bootstrap(&mut conn) {
            Ok(()) => {
                info!(
                    "event=db_open module=persist status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=db_open module=persist status=error mode={mode} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> Option<Snapshot> {
        let body: Option<String> = match self
            .conn
            .query_row(
                "SELECT body FROM snapshots WHERE key = ?1;",
                [RECORD_KEY],
                |row| row.get(0),
            )
            .optional()
        {
            Ok(body) => body,
            Err(err) => {
                warn!("event=snapshot_load module=persist status=error error={err}");
                return None;
            }
        };

        let body = body?;
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Some(Snapshot::from_value(&value)),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=persist status=error error_code=unparsable_record error={err}"
                );
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) {
        let body = match serde_json::to_string(snapshot) {
            Ok(body) => body,
            Err(err) => {
                error!(
                    "event=snapshot_save module=persist status=error error_code=serialize error={err}"
                );
                return;
            }
        };

        let written = self.conn.execute(
            "INSERT INTO snapshots (key, body, saved_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                body = excluded.body,
                saved_at = excluded.saved_at;",
            params![RECORD_KEY, body],
        );

        match written {
            Ok(_) => debug!("event=snapshot_save module=persist status=ok bytes={}", body.len()),
            Err(err) => {
                error!("event=snapshot_save module=persist status=error error_code=write error={err}");
            }
        }
    }

    fn clear(&self) {
        if let Err(err) = self
            .conn
            .execute("DELETE FROM snapshots WHERE key = ?1;", [RECORD_KEY])
        {
            error!("event=snapshot_clear module=persist status=error error={err}");
        }
    }
}

fn bootstrap(conn: &mut Connection) -> PersistResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let db_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if db_version > SCHEMA_VERSION {
        return Err(PersistError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: SCHEMA_VERSION,
        });
    }
    if db_version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(())
}
