//! SQLite-backed key-value persistence for store snapshots.
//!
//! # Responsibility
//! - Open and configure the SQLite connection holding persisted state.
//! - Read and write whole-store JSON snapshots under fixed string keys.
//!
//! # Invariants
//! - One row per store key; a write replaces the previous snapshot wholesale.
//! - The schema is created idempotently on open; there is no migration
//!   ladder, stale payload shapes are absorbed at decode time instead.
//! - Multi-store writes are transactional: either every row updates or none.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod snapshots;

pub use open::{open_storage, open_storage_in_memory};
pub use snapshots::{encode_snapshot, load_snapshot, write_snapshot, write_snapshots};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    Encode {
        store_key: &'static str,
        message: String,
    },
    Decode {
        store_key: &'static str,
        message: String,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Encode { store_key, message } => {
                write!(f, "failed to encode snapshot `{store_key}`: {message}")
            }
            Self::Decode { store_key, message } => {
                write!(f, "failed to decode snapshot `{store_key}`: {message}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode { .. } | Self::Decode { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
