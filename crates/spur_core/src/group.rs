//! Table-group resolution.
//!
//! Every record type owns one table per index, named `"{type}/{index}"`.
//! Table 0 is the primary data table (primary key → serialized record);
//! tables 1..N-1 are secondary index tables (composite key → primary key).
//! Auto-increment identifiers live in a shared `__sequence__` table keyed
//! by type name, since redb has no per-table sequence.

use std::collections::HashSet;

use redb::{
    ReadOnlyTable, ReadTransaction, ReadableTable, Table, TableDefinition, TableHandle,
    WriteTransaction,
};

use crate::error::{Error, Result};

/// Key and value types of every Spur table. Keeping one shape for all
/// tables (the sequence table included) lets the diagnostic dump open them
/// uniformly.
pub(crate) type ByteTable<'txn> = Table<'txn, &'static [u8], &'static [u8]>;

/// Last-issued auto-increment identifier per record type, big-endian u64.
pub(crate) const SEQUENCE: TableDefinition<'static, &'static [u8], &'static [u8]> =
    TableDefinition::new("__sequence__");

/// Returns the storage table name for a record type's index.
pub(crate) fn table_name(type_name: &str, index: u8) -> String {
    format!("{type_name}/{index}")
}

/// All tables backing one record type, valid for one write transaction.
pub(crate) struct WriteGroup<'txn> {
    pub tables: Vec<ByteTable<'txn>>,
}

impl<'txn> WriteGroup<'txn> {
    /// Opens the record type's tables, creating any that are absent.
    /// Creation is idempotent.
    pub fn resolve(txn: &'txn WriteTransaction, type_name: &str, count: u8) -> Result<Self> {
        if count == 0 {
            return Err(Error::MissingIndex);
        }
        let mut tables = Vec::with_capacity(count as usize);
        for index in 0..count {
            let name = table_name(type_name, index);
            let def = TableDefinition::<&[u8], &[u8]>::new(&name);
            tables.push(txn.open_table(def)?);
        }
        Ok(Self { tables })
    }

    /// Opens the record type's tables, failing with [`Error::TableMissing`]
    /// if any expected table does not exist. Used by the delete path, which
    /// must never create state as a side effect.
    pub fn resolve_existing(
        txn: &'txn WriteTransaction,
        type_name: &str,
        count: u8,
    ) -> Result<Self> {
        if count == 0 {
            return Err(Error::MissingIndex);
        }
        let existing: HashSet<String> = txn
            .list_tables()?
            .map(|handle| handle.name().to_string())
            .collect();
        for index in 0..count {
            let name = table_name(type_name, index);
            if !existing.contains(&name) {
                return Err(Error::table_missing(name));
            }
        }
        Self::resolve(txn, type_name, count)
    }
}

/// All tables backing one record type, valid for one read transaction.
pub(crate) struct ReadGroup {
    pub tables: Vec<ReadOnlyTable<&'static [u8], &'static [u8]>>,
}

impl ReadGroup {
    /// Opens the record type's tables for reading. A missing table means
    /// the type has never been written, or the store was modified
    /// out-of-band.
    pub fn resolve(txn: &ReadTransaction, type_name: &str, count: u8) -> Result<Self> {
        if count == 0 {
            return Err(Error::MissingIndex);
        }
        let mut tables = Vec::with_capacity(count as usize);
        for index in 0..count {
            let name = table_name(type_name, index);
            let def = TableDefinition::<&[u8], &[u8]>::new(&name);
            match txn.open_table(def) {
                Ok(table) => tables.push(table),
                Err(redb::TableError::TableDoesNotExist(_)) => {
                    return Err(Error::table_missing(name));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Self { tables })
    }
}

/// Issues the next auto-increment identifier for a record type.
///
/// Identifiers start at 1 and are never reused; callers consume exactly one
/// per inserted record, so deleted records leave gaps.
pub(crate) fn next_sequence(table: &mut ByteTable<'_>, type_name: &str) -> Result<u64> {
    let key = type_name.as_bytes();
    let last = match table.get(key)? {
        Some(guard) => {
            let bytes: [u8; 8] = guard
                .value()
                .try_into()
                .map_err(|_| Error::record(format!("corrupt sequence entry for \"{type_name}\"")))?;
            u64::from_be_bytes(bytes)
        }
        None => 0,
    };
    let next = last + 1;
    table.insert(key, next.to_be_bytes().as_slice())?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use redb::backends::InMemoryBackend;

    fn memory_store() -> redb::Database {
        redb::Builder::new()
            .create_with_backend(InMemoryBackend::new())
            .unwrap()
    }

    #[test]
    fn table_names() {
        assert_eq!(table_name("person", 0), "person/0");
        assert_eq!(table_name("person", 2), "person/2");
    }

    #[test]
    fn zero_indexes_rejected() {
        let store = memory_store();
        let txn = store.begin_write().unwrap();
        let result = WriteGroup::resolve(&txn, "empty", 0);
        assert!(matches!(result, Err(Error::MissingIndex)));
    }

    #[test]
    fn read_resolve_missing_table() {
        let store = memory_store();
        let txn = store.begin_read().unwrap();
        let result = ReadGroup::resolve(&txn, "ghost", 2);
        assert!(matches!(result, Err(Error::TableMissing { .. })));
    }

    #[test]
    fn write_resolve_is_idempotent() {
        let store = memory_store();
        {
            let txn = store.begin_write().unwrap();
            WriteGroup::resolve(&txn, "thing", 3).unwrap();
            txn.commit().unwrap();
        }
        {
            let txn = store.begin_write().unwrap();
            let group = WriteGroup::resolve(&txn, "thing", 3).unwrap();
            assert_eq!(group.tables.len(), 3);
            drop(group);
            txn.commit().unwrap();
        }
        let txn = store.begin_read().unwrap();
        ReadGroup::resolve(&txn, "thing", 3).unwrap();
    }

    #[test]
    fn resolve_existing_requires_tables() {
        let store = memory_store();
        let txn = store.begin_write().unwrap();
        let result = WriteGroup::resolve_existing(&txn, "ghost", 1);
        assert!(matches!(result, Err(Error::TableMissing { .. })));
    }

    #[test]
    fn sequence_is_monotonic_per_type() {
        let store = memory_store();
        let txn = store.begin_write().unwrap();
        {
            let mut seq = txn.open_table(SEQUENCE).unwrap();
            assert_eq!(next_sequence(&mut seq, "a").unwrap(), 1);
            assert_eq!(next_sequence(&mut seq, "a").unwrap(), 2);
            assert_eq!(next_sequence(&mut seq, "b").unwrap(), 1);
            assert_eq!(next_sequence(&mut seq, "a").unwrap(), 3);
        }
        txn.commit().unwrap();
    }
}
