//! Engine facade and write batching.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::Options;
use crate::dump;
use crate::error::{Error, Result};
use crate::group::{self, ReadGroup, WriteGroup, SEQUENCE};
use crate::record::Record;
use crate::sync;
use crate::wrap::WrapDb;

/// The engine handle.
///
/// `Db` stores and retrieves values of any type implementing [`Record`],
/// maintaining every declared secondary index consistently with the
/// primary data. It is safe for concurrent use from multiple threads: all
/// state lives in the underlying store, accessed inside scoped
/// transactions, and the handle itself only tracks whether it is open.
///
/// # Write batching
///
/// The streaming write operations ([`put`](Db::put), [`add`](Db::add),
/// [`delete`](Db::delete)) split their work into successive write
/// transactions of at most [`Options::chunk_size`] record operations. A
/// failure aborts the current chunk and the whole logical call, but chunks
/// committed earlier stay committed. This bounds the resource cost of very
/// large writes at the price of strict cross-chunk atomicity.
pub struct Db {
    store: RwLock<Option<redb::Database>>,
    options: Options,
}

impl Db {
    /// Opens an existing database file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, Options::default())
    }

    /// Opens an existing database file.
    ///
    /// Fails if the path does not name a regular file, or the file is not
    /// a database.
    pub fn open_with(path: impl AsRef<Path>, options: Options) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath {
                path: path.display().to_string(),
            });
        }
        let store = Self::builder(&options).open(path)?;
        debug!(path = %path.display(), "opened database");
        Ok(Self::from_store(store, options))
    }

    /// Creates a database file with default options, replacing any
    /// existing file at the path.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_with(path, Options::default())
    }

    /// Creates a database file, replacing any existing file at the path.
    pub fn create_with(path: impl AsRef<Path>, options: Options) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            fs::remove_file(path)?;
        }
        let store = Self::builder(&options).create(path)?;
        debug!(path = %path.display(), "created database");
        Ok(Self::from_store(store, options))
    }

    /// Creates a non-persistent database backed by memory with default
    /// options. Data is lost when the handle is dropped.
    pub fn create_in_memory() -> Result<Self> {
        Self::create_in_memory_with(Options::default())
    }

    /// Creates a non-persistent database backed by memory.
    pub fn create_in_memory_with(options: Options) -> Result<Self> {
        let store = Self::builder(&options)
            .create_with_backend(redb::backends::InMemoryBackend::new())?;
        Ok(Self::from_store(store, options))
    }

    fn builder(options: &Options) -> redb::Builder {
        let mut builder = redb::Builder::new();
        if let Some(bytes) = options.cache_size {
            builder.set_cache_size(bytes);
        }
        builder
    }

    fn from_store(store: redb::Database, options: Options) -> Self {
        Self {
            store: RwLock::new(Some(store)),
            options,
        }
    }

    /// Returns zero or more records in index order.
    ///
    /// The scan runs over the index specified by `index` in a snapshot
    /// read transaction, starting at the first entry whose key is not
    /// below the key derived from `rec`'s currently-populated fields
    /// (only the fields backing that index need to be assigned). Each
    /// match is parsed into `rec` and `f(&rec)` is invoked; the scan
    /// advances while `f` returns true. Returning false stops the scan
    /// without error and without storage side effects.
    ///
    /// Results arrive in non-decreasing byte order of the index's stored
    /// keys. For a secondary index, each entry is resolved to its primary
    /// record; a dangling reference fails with [`Error::MissingRecord`].
    pub fn get<R, F>(&self, rec: &mut R, index: u8, mut f: F) -> Result<()>
    where
        R: Record,
        F: FnMut(&R) -> bool,
    {
        let count = rec.index_count();
        if index >= count {
            return Err(Error::IndexOutOfRange { index, count });
        }
        let guard = self.store.read();
        let store = guard.as_ref().ok_or(Error::NotOpen)?;
        let txn = store.begin_read()?;
        let group = ReadGroup::resolve(&txn, rec.type_name(), count)?;
        let seek = rec.index_key(index)?;
        for entry in group.tables[index as usize].range(seek.as_slice()..)? {
            let (_, value) = entry?;
            let data = if index > 0 {
                // Secondary entry: the value is the primary key, so one
                // more lookup fetches the actual record bytes.
                match group.tables[0].get(value.value())? {
                    Some(data) => data.value().to_vec(),
                    None => return Err(Error::MissingRecord),
                }
            } else {
                value.value().to_vec()
            };
            rec.from_bytes(&data)?;
            if !f(rec) {
                break;
            }
        }
        Ok(())
    }

    /// Returns the first record matching `rec`'s populated key fields on
    /// the given index, or [`Error::RecordNotFound`] if nothing matched.
    pub fn get_one<R: Record>(&self, rec: &mut R, index: u8) -> Result<()> {
        let mut found = false;
        self.get(rec, index, |_| {
            found = true;
            false
        })?;
        if found {
            Ok(())
        } else {
            Err(Error::RecordNotFound)
        }
    }

    /// Inserts or replaces zero or more records.
    ///
    /// Each time `f(&mut rec)` returns true, the record it populated is
    /// stored: inserted if its primary key is new, overwriting the stored
    /// record otherwise. All of a record's key fields must be assigned on
    /// every iteration so that changed secondary keys are replaced.
    ///
    /// The primary key is identity: if an update changes it, the entry
    /// stored under the old primary key is orphaned, not cleaned up. Use
    /// [`delete`](Db::delete) under the old identity first.
    pub fn put<R, F>(&self, rec: &mut R, f: F) -> Result<()>
    where
        R: Record,
        F: FnMut(&mut R) -> bool,
    {
        self.write_stream(rec, f, false)
    }

    /// Inserts or replaces exactly one record. See [`put`](Db::put).
    pub fn put_one<R: Record>(&self, rec: &mut R) -> Result<()> {
        self.put(rec, once())
    }

    /// Inserts zero or more records, assigning each a fresh
    /// auto-increment identifier.
    ///
    /// Behaves like [`put`](Db::put), except that before each stored
    /// record's keys are computed, [`Record::assign_id`] receives the next
    /// identifier from the type's sequence. Applications that manage
    /// their own unique primary keys should prefer `put`.
    pub fn add<R, F>(&self, rec: &mut R, f: F) -> Result<()>
    where
        R: Record,
        F: FnMut(&mut R) -> bool,
    {
        self.write_stream(rec, f, true)
    }

    /// Inserts exactly one record with a fresh identifier. See
    /// [`add`](Db::add).
    pub fn add_one<R: Record>(&self, rec: &mut R) -> Result<()> {
        self.add(rec, once())
    }

    /// Removes zero or more records and all of their index entries.
    ///
    /// Each time `f(&mut rec)` returns true, the record whose primary key
    /// fields it populated is removed along with every secondary entry,
    /// atomically within the current chunk transaction. Only the primary
    /// key fields need to be assigned. A missing table fails with
    /// [`Error::TableMissing`] rather than being treated as already
    /// deleted.
    pub fn delete<R, F>(&self, rec: &mut R, mut f: F) -> Result<()>
    where
        R: Record,
        F: FnMut(&mut R) -> bool,
    {
        let count = rec.index_count();
        let chunk = self.options.chunk_size.max(1);
        let guard = self.store.read();
        let store = guard.as_ref().ok_or(Error::NotOpen)?;
        let mut scratch = rec.scratch();
        let mut more = true;
        while more {
            let txn = store.begin_write()?;
            let mut ops = 0usize;
            {
                let mut group = WriteGroup::resolve_existing(&txn, rec.type_name(), count)?;
                for _ in 0..chunk {
                    if !f(rec) {
                        more = false;
                        break;
                    }
                    sync::delete_record(&mut group.tables, rec, &mut scratch, count)?;
                    ops += 1;
                }
            }
            txn.commit()?;
            trace!(ops, type_name = rec.type_name(), "committed delete chunk");
        }
        Ok(())
    }

    /// Removes exactly one record. See [`delete`](Db::delete).
    pub fn delete_one<R: Record>(&self, rec: &mut R) -> Result<()> {
        self.delete(rec, once())
    }

    /// Renders every table's keys and values as a hex/ASCII listing.
    ///
    /// Purely diagnostic and best-effort: write failures are ignored and
    /// a closed handle dumps nothing.
    pub fn dump(&self, wr: &mut impl io::Write) {
        let guard = self.store.read();
        if let Some(store) = guard.as_ref() {
            let _ = dump::dump_store(store, wr);
        }
    }

    /// Returns a deferred-error wrapper around this handle.
    pub fn wrap(&self) -> WrapDb<'_> {
        WrapDb::new(self)
    }

    /// Shuts the database down and releases the underlying store.
    ///
    /// Any later operation on this handle fails with [`Error::NotOpen`],
    /// as does a second `close`.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.store.write();
        match guard.take() {
            Some(store) => {
                drop(store);
                debug!("closed database");
                Ok(())
            }
            None => Err(Error::NotOpen),
        }
    }

    /// Whether the handle is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.store.read().is_some()
    }

    /// Backing method for `put` and `add`.
    fn write_stream<R, F>(&self, rec: &mut R, mut f: F, assign_ids: bool) -> Result<()>
    where
        R: Record,
        F: FnMut(&mut R) -> bool,
    {
        let count = rec.index_count();
        let chunk = self.options.chunk_size.max(1);
        let guard = self.store.read();
        let store = guard.as_ref().ok_or(Error::NotOpen)?;
        let mut scratch = rec.scratch();
        let mut more = true;
        while more {
            let txn = store.begin_write()?;
            let mut ops = 0usize;
            {
                let mut group = WriteGroup::resolve(&txn, rec.type_name(), count)?;
                let mut seq = if assign_ids {
                    Some(txn.open_table(SEQUENCE)?)
                } else {
                    None
                };
                for _ in 0..chunk {
                    if !f(rec) {
                        more = false;
                        break;
                    }
                    if let Some(seq) = seq.as_mut() {
                        let id = group::next_sequence(seq, rec.type_name())?;
                        rec.assign_id(id);
                    }
                    sync::sync_record(&mut group.tables, rec, &mut scratch, count)?;
                    ops += 1;
                }
            }
            txn.commit()?;
            trace!(ops, type_name = rec.type_name(), "committed write chunk");
        }
        Ok(())
    }
}

/// Returns a continuation that accepts exactly one iteration.
fn once<R>() -> impl FnMut(&mut R) -> bool {
    let mut first = true;
    move |_| std::mem::take(&mut first)
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("is_open", &self.is_open())
            .field("chunk_size", &self.options.chunk_size)
            .finish_non_exhaustive()
    }
}
