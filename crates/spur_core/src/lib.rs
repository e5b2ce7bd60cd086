//! # Spur
//!
//! An embedded multi-index record storage engine layered on [redb].
//!
//! Spur automates the storage and retrieval of structured records with
//! multiple retrieval indexes. Applications register record types by
//! implementing the [`Record`] trait, which isolates key construction and
//! value encoding to one place; the engine then provides:
//!
//! - Ordered iteration and point lookup over any declared index
//! - Insert/update with automatic secondary-index convergence
//! - Auto-incrementing identifiers via [`Db::add`]
//! - Deletes that remove a record and all of its index entries together
//! - Chunked write transactions that bound the cost of large batches
//! - A deferred-error wrapper ([`WrapDb`]) for linear call sequences
//!
//! Only the primary index (index 0) needs unique keys; the engine appends
//! the primary key to every secondary key, so secondary indexes may hold
//! duplicate logical values. Keys must sort correctly as raw bytes;
//! fixed-width big-endian segments are the usual approach.
//!
//! Joined queries across record types, schema migration, and query
//! planning are out of scope: retrieval is always an ordered scan of one
//! index, optionally seeded by a partial key and bounded by a caller
//! continuation.
//!
//! [redb]: https://docs.rs/redb

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod db;
mod dump;
mod error;
mod group;
mod keyset;
mod record;
mod sync;
mod wrap;

pub use config::Options;
pub use db::Db;
pub use error::{Error, Result};
pub use record::Record;
pub use wrap::WrapDb;
