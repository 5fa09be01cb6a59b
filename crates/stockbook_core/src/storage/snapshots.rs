//! Snapshot read/write primitives over the `store_state` table.
//!
//! # Responsibility
//! - Serialize store state to JSON and upsert it under the store's key.
//! - Load and decode previously persisted snapshots.
//! - Group writes for composite operations into one transaction.
//!
//! # Invariants
//! - `saved_at` reflects the write time, not the snapshot content.
//! - Decoding tolerates unknown fields so older builds' rows stay loadable.

use log::debug;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{StorageError, StorageResult};
use crate::model::epoch_ms_now;

const UPSERT_SQL: &str =
    "INSERT OR REPLACE INTO store_state (store_key, payload, saved_at) VALUES (?1, ?2, ?3);";

/// Serializes `state` to the JSON payload stored under `store_key`.
///
/// Exposed separately so composite operations can encode every payload
/// up front and only then open the write transaction.
pub fn encode_snapshot<T: Serialize>(store_key: &'static str, state: &T) -> StorageResult<String> {
    serde_json::to_string(state).map_err(|err| StorageError::Encode {
        store_key,
        message: err.to_string(),
    })
}

/// Writes one snapshot, replacing any previous row for the same key.
pub fn write_snapshot<T: Serialize>(
    conn: &Connection,
    store_key: &'static str,
    state: &T,
) -> StorageResult<()> {
    let payload = encode_snapshot(store_key, state)?;
    conn.execute(UPSERT_SQL, params![store_key, payload, epoch_ms_now()])?;
    debug!(
        "event=snapshot_write module=storage status=ok store={store_key} bytes={}",
        payload.len()
    );
    Ok(())
}

/// Writes several pre-encoded snapshots in a single transaction.
///
/// Used by operations that touch more than one store, so a crash between
/// rows cannot leave the stores referencing each other inconsistently.
pub fn write_snapshots(
    conn: &mut Connection,
    entries: &[(&'static str, String)],
) -> StorageResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let saved_at = epoch_ms_now();
    for (store_key, payload) in entries {
        tx.execute(UPSERT_SQL, params![store_key, payload, saved_at])?;
    }
    tx.commit()?;
    debug!(
        "event=snapshot_write module=storage status=ok stores={}",
        entries.len()
    );
    Ok(())
}

/// Loads the snapshot stored under `store_key`, or `None` when no row exists.
pub fn load_snapshot<T: DeserializeOwned>(
    conn: &Connection,
    store_key: &'static str,
) -> StorageResult<Option<T>> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM store_state WHERE store_key = ?1;",
            [store_key],
            |row| row.get(0),
        )
        .optional()?;

    match payload {
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| StorageError::Decode {
                store_key,
                message: err.to_string(),
            }),
        None => Ok(None),
    }
}
