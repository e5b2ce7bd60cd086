//! Failure-path coverage: bad handles, bad paths, bad indexes, and record
//! types that violate the contract.

use std::io::Write;

use spur_core::{Db, Error, Record, Result};
use spur_testkit::{PlainId, Quantity, IDX_QUANTITY_ID};

/// A record type that declares no indexes at all.
#[derive(Debug, Default, Clone, Copy)]
struct Bare;

impl Record for Bare {
    fn type_name(&self) -> &'static str {
        "bare"
    }

    fn index_count(&self) -> u8 {
        0
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn from_bytes(&mut self, _bytes: &[u8]) -> Result<()> {
        Ok(())
    }

    fn index_key(&self, index: u8) -> Result<Vec<u8>> {
        Err(Error::IndexOutOfRange { index, count: 0 })
    }

    fn scratch(&self) -> Self {
        Self
    }

    fn assign_id(&mut self, _id: u64) {}
}

#[test]
fn zero_index_type_is_rejected() {
    let db = Db::create_in_memory().unwrap();
    let mut rec = Bare;
    assert!(matches!(db.put_one(&mut rec), Err(Error::MissingIndex)));
    assert!(matches!(db.add_one(&mut rec), Err(Error::MissingIndex)));
    assert!(matches!(db.delete_one(&mut rec), Err(Error::MissingIndex)));
    assert!(matches!(
        db.get(&mut rec, 0, |_| true),
        Err(Error::IndexOutOfRange { index: 0, count: 0 })
    ));
}

#[test]
fn open_rejects_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let result = Db::open(dir.path().join("absent.redb"));
    assert!(matches!(result, Err(Error::InvalidPath { .. })));
}

#[test]
fn open_rejects_non_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-db");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"assorted bytes, not a store").unwrap();
    drop(file);
    assert!(Db::open(&path).is_err());
}

#[test]
fn closed_handle_refuses_everything() {
    let db = Db::create_in_memory().unwrap();
    let mut rec = Quantity::new(1);
    db.put_one(&mut rec).unwrap();
    db.close().unwrap();

    let mut probe = Quantity::with_id(1);
    assert!(matches!(
        db.get_one(&mut probe, IDX_QUANTITY_ID),
        Err(Error::NotOpen)
    ));
    assert!(matches!(db.put_one(&mut rec), Err(Error::NotOpen)));
    assert!(matches!(db.delete_one(&mut probe), Err(Error::NotOpen)));
    assert!(matches!(db.close(), Err(Error::NotOpen)));
}

#[test]
fn seek_past_last_record_reports_not_found() {
    let db = Db::create_in_memory().unwrap();
    for id in 1..=3 {
        let mut rec = PlainId::new(id);
        db.put_one(&mut rec).unwrap();
    }
    let mut probe = PlainId::new(9);
    assert!(matches!(db.get_one(&mut probe, 0), Err(Error::RecordNotFound)));
}

#[test]
fn wild_index_reports_out_of_range() {
    let db = Db::create_in_memory().unwrap();
    let mut rec = Quantity::default();
    assert!(matches!(
        db.get(&mut rec, 42, |_| true),
        Err(Error::IndexOutOfRange { index: 42, count: 2 })
    ));
}
