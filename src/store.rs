use crate::dlog;
use crate::types::{Workout, WorkoutRecord};
use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashSet;
use std::path::Path;

/// Key the workout snapshot lives under.
pub const SNAPSHOT_KEY: &str = "workouts";

/// Whole-blob workout snapshot kept in a SQLite key/value table.
///
/// There is exactly one row per key, so every `save` replaces the previous
/// snapshot in a single statement and the last writer wins.
pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    pub fn open(path: &Path) -> Result<Self> {
        let display = path.display();
        let conn =
            Connection::open(path).with_context(|| format!("Opening snapshot store: {display}"))?;
        Self::init(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Opening in-memory snapshot store")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS local_storage (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )
        .context("Creating local_storage table")?;
        Ok(Self { conn })
    }

    pub fn save(&self, workouts: &[Workout]) -> Result<()> {
        let records: Vec<WorkoutRecord> = workouts.iter().map(Workout::to_record).collect();
        let blob = serde_json::to_string(&records).context("Serializing workouts")?;
        self.set_item(SNAPSHOT_KEY, &blob)?;
        tracing::info!(workouts = workouts.len(), "snapshot saved");
        Ok(())
    }

    /// Load the last snapshot.
    ///
    /// A missing or unparseable blob yields an empty list; only SQLite
    /// failures are errors. Records that fail validation or repeat an
    /// earlier id are dropped.
    pub fn load(&self) -> Result<Vec<Workout>> {
        let Some(blob) = self.get_raw(SNAPSHOT_KEY)? else {
            dlog!("no snapshot stored");
            return Ok(Vec::new());
        };

        let records: Vec<WorkoutRecord> = match serde_json::from_slice(&blob) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(err = %e, bytes = blob.len(), "snapshot unreadable; starting empty");
                return Ok(Vec::new());
            }
        };

        let total = records.len();
        let mut out = Vec::with_capacity(total);
        let mut seen = HashSet::with_capacity(total);
        for rec in records {
            let id = rec.id.clone();
            if seen.contains(&id) {
                tracing::warn!(id = %id, "skipping stored workout with duplicate id");
                continue;
            }
            match Workout::from_record(rec) {
                Ok(w) => {
                    seen.insert(id);
                    out.push(w);
                }
                Err(e) => tracing::warn!(id = %id, err = %e, "skipping invalid stored workout"),
            }
        }

        dlog!("snapshot loaded total={} valid={}", total, out.len());
        Ok(out)
    }

    pub fn reset(&self) -> Result<()> {
        self.remove_item(SNAPSHOT_KEY)?;
        tracing::info!("snapshot cleared");
        Ok(())
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let Some(bytes) = self.get_raw(key)? else {
            return Ok(None);
        };
        let text =
            String::from_utf8(bytes).with_context(|| format!("Key {key:?} is not text"))?;
        Ok(Some(text))
    }

    /// Raw bytes under `key`, whatever SQLite type they were written as.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| {
                    Ok(match row.get_ref(0)? {
                        ValueRef::Text(b) | ValueRef::Blob(b) => b.to_vec(),
                        ValueRef::Integer(i) => i.to_string().into_bytes(),
                        ValueRef::Real(f) => f.to_string().into_bytes(),
                        ValueRef::Null => Vec::new(),
                    })
                },
            )
            .optional()
            .with_context(|| format!("Reading key {key:?}"))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                r"
                INSERT INTO local_storage (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                ",
                params![key, value],
            )
            .with_context(|| format!("Writing key {key:?}"))?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", [key])
            .with_context(|| format!("Removing key {key:?}"))?;
        Ok(())
    }
}
