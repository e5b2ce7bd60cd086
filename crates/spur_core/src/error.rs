//! Error types for the Spur engine.

use std::io;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Spur engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Operation attempted after `close()`.
    #[error("database is not open")]
    NotOpen,

    /// A record type declared zero indexes.
    #[error("at least one index must be defined")]
    MissingIndex,

    /// Requested index is not declared by the record type.
    #[error("index {index} too large, must be less than {count}")]
    IndexOutOfRange {
        /// The index that was requested.
        index: u8,
        /// The record type's declared index count.
        count: u8,
    },

    /// An expected storage table is absent on a read-only path. The record
    /// type has never been written, or its data was removed out-of-band.
    #[error("table \"{name}\" missing")]
    TableMissing {
        /// Name of the missing table.
        name: String,
    },

    /// A secondary index entry references a primary key that resolves to no
    /// stored record. This indicates index corruption.
    #[error("missing record for valid index")]
    MissingRecord,

    /// No match was found for the requested record. This is a normal
    /// outcome of a single-record lookup, not corruption.
    #[error("record not found")]
    RecordNotFound,

    /// Path does not name an existing database file.
    #[error("file \"{path}\" does not exist")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// Failure surfaced by a record's own serialize/parse/key code.
    #[error("record error: {message}")]
    Record {
        /// Description of the failure.
        message: String,
    },

    /// Storage-level error from redb.
    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    /// Transaction error from redb.
    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Commit error from redb.
    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Table error from redb.
    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    /// Database open/create error from redb.
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Creates a record-contract error.
    pub fn record(message: impl Into<String>) -> Self {
        Self::Record {
            message: message.into(),
        }
    }

    /// Creates a missing-table error.
    pub fn table_missing(name: impl Into<String>) -> Self {
        Self::TableMissing { name: name.into() }
    }
}
