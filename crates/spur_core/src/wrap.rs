//! Deferred-error wrapper.

use std::fmt;
use std::io;

use crate::db::Db;
use crate::error::{Error, Result};
use crate::record::Record;

/// A wrapper around [`Db`] that keeps error state internally.
///
/// Its methods mirror those of `Db` but return no error value. Instead the
/// first error encountered is latched and every later operation becomes a
/// no-op, so a sequence of database calls can be checked once at the end:
///
/// ```rust,ignore
/// let mut wdb = db.wrap();
/// wdb.put_one(&mut a);
/// wdb.put_one(&mut b);
/// wdb.get_one(&mut probe, 1);
/// if let Some(err) = wdb.error() {
///     eprintln!("update failed: {err}");
/// }
/// ```
///
/// Unlike `Db`, a `WrapDb` is intended for serial use by one logical task:
/// it holds the latched error as per-instance state. Many tasks may each
/// wrap the same shared `Db` independently.
pub struct WrapDb<'a> {
    db: &'a Db,
    err: Option<Error>,
}

impl<'a> WrapDb<'a> {
    pub(crate) fn new(db: &'a Db) -> Self {
        Self { db, err: None }
    }

    /// Returns the latched error, if any, without altering it.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Clears the latched error and returns its prior value.
    pub fn clear_error(&mut self) -> Option<Error> {
        self.err.take()
    }

    /// Latches a caller-supplied error, unless one is already stored.
    pub fn set_error(&mut self, err: Error) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }

    /// Consumes the wrapper, yielding `Err` if any operation failed.
    pub fn into_result(self) -> Result<()> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn latch(&mut self, result: Result<()>) {
        if let Err(err) = result {
            self.err = Some(err);
        }
    }

    /// Wrapped version of [`Db::get`].
    pub fn get<R, F>(&mut self, rec: &mut R, index: u8, f: F)
    where
        R: Record,
        F: FnMut(&R) -> bool,
    {
        if self.err.is_none() {
            let result = self.db.get(rec, index, f);
            self.latch(result);
        }
    }

    /// Wrapped version of [`Db::get_one`].
    pub fn get_one<R: Record>(&mut self, rec: &mut R, index: u8) {
        if self.err.is_none() {
            let result = self.db.get_one(rec, index);
            self.latch(result);
        }
    }

    /// Wrapped version of [`Db::put`].
    pub fn put<R, F>(&mut self, rec: &mut R, f: F)
    where
        R: Record,
        F: FnMut(&mut R) -> bool,
    {
        if self.err.is_none() {
            let result = self.db.put(rec, f);
            self.latch(result);
        }
    }

    /// Wrapped version of [`Db::put_one`].
    pub fn put_one<R: Record>(&mut self, rec: &mut R) {
        if self.err.is_none() {
            let result = self.db.put_one(rec);
            self.latch(result);
        }
    }

    /// Wrapped version of [`Db::add`].
    pub fn add<R, F>(&mut self, rec: &mut R, f: F)
    where
        R: Record,
        F: FnMut(&mut R) -> bool,
    {
        if self.err.is_none() {
            let result = self.db.add(rec, f);
            self.latch(result);
        }
    }

    /// Wrapped version of [`Db::add_one`].
    pub fn add_one<R: Record>(&mut self, rec: &mut R) {
        if self.err.is_none() {
            let result = self.db.add_one(rec);
            self.latch(result);
        }
    }

    /// Wrapped version of [`Db::delete`].
    pub fn delete<R, F>(&mut self, rec: &mut R, f: F)
    where
        R: Record,
        F: FnMut(&mut R) -> bool,
    {
        if self.err.is_none() {
            let result = self.db.delete(rec, f);
            self.latch(result);
        }
    }

    /// Wrapped version of [`Db::delete_one`].
    pub fn delete_one<R: Record>(&mut self, rec: &mut R) {
        if self.err.is_none() {
            let result = self.db.delete_one(rec);
            self.latch(result);
        }
    }

    /// Wrapped version of [`Db::dump`].
    pub fn dump(&mut self, wr: &mut impl io::Write) {
        if self.err.is_none() {
            self.db.dump(wr);
        }
    }
}

impl fmt::Debug for WrapDb<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapDb")
            .field("err", &self.err)
            .finish_non_exhaustive()
    }
}
