//! Index synchronization.
//!
//! The write-path algorithm that converges a record's secondary index
//! entries to its current field values: compare the stored key set against
//! the new one, delete only the composite keys that changed, and insert
//! only the replacements. Unchanged keys are left untouched to avoid
//! needless write amplification.

use crate::error::Result;
use crate::group::ByteTable;
use crate::keyset::{self, KeySet};
use crate::record::Record;

/// Inserts or replaces one record and converges its secondary indexes.
///
/// `tables[0]` is the primary data table; `scratch` is a working buffer
/// used to reconstruct the stored key set. If the record's primary key has
/// changed since it was stored, the old primary entry is not cleaned up
/// here: the lookup is by the new primary key, so a mutated primary is
/// indistinguishable from a fresh insert. Callers must delete under the
/// old identity first.
pub(crate) fn sync_record<R: Record>(
    tables: &mut [ByteTable<'_>],
    rec: &R,
    scratch: &mut R,
    count: u8,
) -> Result<()> {
    let new = KeySet::from_record(rec, count)?;
    let stored = keyset::stored(&tables[0], scratch, count, new.primary())?;

    // insert[k] marks secondary index k for (re)insertion below.
    let mut insert = vec![false; count as usize];
    match stored {
        None => {
            // Record is new: every secondary entry must be written.
            for flag in insert.iter_mut().skip(1) {
                *flag = true;
            }
        }
        Some(old) => {
            // Record exists: remove obsolete composite keys and mark them
            // for replacement. Equal keys are skipped entirely.
            for index in 1..count as usize {
                if old[index] != new.keys[index] {
                    tables[index].remove(old[index].as_slice())?;
                    insert[index] = true;
                }
            }
        }
    }

    // The primary entry is written unconditionally: this is both the
    // insert and the overwrite path.
    tables[0].insert(new.primary(), new.data.as_slice())?;
    for index in 1..count as usize {
        if insert[index] {
            tables[index].insert(new.keys[index].as_slice(), new.primary())?;
        }
    }
    Ok(())
}

/// Removes one record and all of its index entries.
///
/// Only the fields backing the primary key need to be populated in `rec`;
/// the stored record bytes supply the secondary keys to remove. A primary
/// key with no stored record is a no-op: there is no state to converge.
pub(crate) fn delete_record<R: Record>(
    tables: &mut [ByteTable<'_>],
    rec: &R,
    scratch: &mut R,
    count: u8,
) -> Result<()> {
    let primary = rec.index_key(0)?;
    let Some(old) = keyset::stored(&tables[0], scratch, count, &primary)? else {
        return Ok(());
    };
    for index in 0..count as usize {
        tables[index].remove(old[index].as_slice())?;
    }
    Ok(())
}
