//! The record contract.

use crate::error::Result;

/// The capability set every stored record type implements.
///
/// A `Record` carries its own serialization, its index layout, and its key
/// construction, so the engine never needs reflection or a schema. Index 0
/// is always the primary index; its key must be unique per record. Up to
/// 255 secondary indexes may follow, and their keys need not be unique,
/// because the engine appends the primary key to every secondary key as a
/// tiebreak.
///
/// `type_name()` and `index_count()` describe the record *type*, not the
/// instance, and must never change for a given type. Violating either
/// silently corrupts stored state.
///
/// Keys must sort correctly as raw bytes: use fixed-width big-endian
/// integers and fixed-width padded strings (see `spur_testkit::KeyBuf` for
/// a builder).
pub trait Record {
    /// Stable name identifying the record type's storage namespace.
    fn type_name(&self) -> &'static str;

    /// Number of indexes maintained for this type. Must be at least 1.
    fn index_count(&self) -> u8;

    /// Serializes the record to bytes.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Parses the given bytes into this record, replacing its fields.
    fn from_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// Constructs the raw key for the index specified by `index`.
    ///
    /// An out-of-range index is an error, never clamped.
    fn index_key(&self, index: u8) -> Result<Vec<u8>>;

    /// Returns a fresh working instance of the same type. The engine uses
    /// it as a scratch buffer when reconstructing stored key sets.
    fn scratch(&self) -> Self
    where
        Self: Sized;

    /// Receives an auto-incremented identifier prior to insertion.
    ///
    /// Called only by the `add` path, before any call to `index_key`.
    /// Issued identifiers are never reused, including for deleted records,
    /// so gaps are expected.
    fn assign_id(&mut self, id: u64);
}
