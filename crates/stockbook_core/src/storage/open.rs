//! Connection bootstrap for the snapshot store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Create the snapshot table idempotently before returning.
//!
//! # Invariants
//! - Returned connections always have the `store_state` table present.
//! - Opening an existing database never rewrites stored payloads.

use super::StorageResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Single KV table holding one JSON snapshot per store.
const SCHEMA_SQL: &str = "\
CREATE TABLE IF NOT EXISTS store_state (
    store_key TEXT PRIMARY KEY NOT NULL,
    payload   TEXT NOT NULL,
    saved_at  INTEGER NOT NULL
);";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a snapshot database file, creating the schema when absent.
///
/// # Side effects
/// - Emits `storage_open` logging events with duration and status.
pub fn open_storage(path: impl AsRef<Path>) -> StorageResult<Connection> {
    let started_at = Instant::now();
    info!("event=storage_open module=storage status=start mode=file");

    let result = Connection::open(path)
        .map_err(Into::into)
        .and_then(bootstrap_connection);
    finish_open("file", started_at, result)
}

/// Opens an in-memory snapshot database, mainly for tests and smoke runs.
///
/// # Side effects
/// - Emits `storage_open` logging events with duration and status.
pub fn open_storage_in_memory() -> StorageResult<Connection> {
    let started_at = Instant::now();
    info!("event=storage_open module=storage status=start mode=memory");

    let result = Connection::open_in_memory()
        .map_err(Into::into)
        .and_then(bootstrap_connection);
    finish_open("memory", started_at, result)
}

fn bootstrap_connection(conn: Connection) -> StorageResult<Connection> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(conn)
}

fn finish_open(
    mode: &str,
    started_at: Instant,
    result: StorageResult<Connection>,
) -> StorageResult<Connection> {
    match &result {
        Ok(_) => info!(
            "event=storage_open module=storage status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=storage_open module=storage status=error mode={mode} duration_ms={} error_code=storage_open_failed error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}
