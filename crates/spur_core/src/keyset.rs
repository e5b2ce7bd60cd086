//! Key-set derivation.
//!
//! A key set is the tuple of all index keys for one record value at one
//! point in time: the primary key at position 0, and at every other
//! position the record's raw index key with the primary key appended. The
//! suffix makes logically-duplicate secondary keys individually
//! addressable and removable.

use redb::ReadableTable;

use crate::error::Result;
use crate::record::Record;

/// A record's serialized bytes together with its full key set.
pub(crate) struct KeySet {
    pub data: Vec<u8>,
    pub keys: Vec<Vec<u8>>,
}

impl KeySet {
    /// Derives the key set from a caller-populated record.
    ///
    /// Any key-construction failure aborts the enclosing operation; no
    /// partial key set is ever used.
    pub fn from_record<R: Record>(rec: &R, count: u8) -> Result<Self> {
        let data = rec.to_bytes()?;
        let mut keys = Vec::with_capacity(count as usize);
        keys.push(rec.index_key(0)?);
        for index in 1..count {
            let mut key = rec.index_key(index)?;
            key.extend_from_slice(&keys[0]);
            keys.push(key);
        }
        Ok(Self { data, keys })
    }

    /// The primary key (index 0).
    pub fn primary(&self) -> &[u8] {
        &self.keys[0]
    }
}

/// Reconstructs the key set currently stored under `primary`, or `None` if
/// no record is stored there.
///
/// The keys are rebuilt from the on-disk record bytes via `scratch`, not
/// from the caller's buffer: they must reflect what storage actually
/// holds, or stale secondary entries would survive an update.
pub(crate) fn stored<R, T>(
    data_table: &T,
    scratch: &mut R,
    count: u8,
    primary: &[u8],
) -> Result<Option<Vec<Vec<u8>>>>
where
    R: Record,
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let data = match data_table.get(primary)? {
        Some(guard) => guard.value().to_vec(),
        None => return Ok(None),
    };
    scratch.from_bytes(&data)?;
    let mut keys = Vec::with_capacity(count as usize);
    keys.push(primary.to_vec());
    for index in 1..count {
        let mut key = scratch.index_key(index)?;
        key.extend_from_slice(primary);
        keys.push(key);
    }
    Ok(Some(keys))
}
