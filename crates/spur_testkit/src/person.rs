//! Example record: a person with name indexes.

use std::fmt;

use serde::{Deserialize, Serialize};
use spur_core::{Error, Record, Result};

use crate::key::KeyBuf;

/// Primary index: id.
pub const IDX_PERSON_ID: u8 = 0;
/// Secondary index: last name, then first, then middle.
pub const IDX_PERSON_LAST: u8 = 1;
/// Secondary index: first name, then middle, then last.
pub const IDX_PERSON_FIRST: u8 = 2;

const INDEX_COUNT: u8 = 3;

/// A simple record describing an individual, retrievable by id, last
/// name, or first name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier; assigned by the engine on `add`.
    pub id: u16,
    /// Last name.
    pub last: String,
    /// Middle initial.
    pub middle: String,
    /// First name.
    pub first: String,
}

impl Person {
    /// Convenience constructor for test data.
    #[must_use]
    pub fn named(last: &str, middle: &str, first: &str) -> Self {
        Self {
            id: 0,
            last: last.to_string(),
            middle: middle.to_string(),
            first: first.to_string(),
        }
    }
}

impl Record for Person {
    fn type_name(&self) -> &'static str {
        "person"
    }

    fn index_count(&self) -> u8 {
        INDEX_COUNT
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        ciborium::into_writer(self, &mut data).map_err(|e| Error::record(e.to_string()))?;
        Ok(data)
    }

    fn from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        *self = ciborium::from_reader(bytes).map_err(|e| Error::record(e.to_string()))?;
        Ok(())
    }

    fn index_key(&self, index: u8) -> Result<Vec<u8>> {
        match index {
            IDX_PERSON_ID => Ok(KeyBuf::new().u16(self.id).build()),
            IDX_PERSON_LAST => Ok(KeyBuf::new()
                .str_fixed(&self.last, 12)
                .str_fixed(&self.first, 8)
                .str_fixed(&self.middle, 1)
                .build()),
            IDX_PERSON_FIRST => Ok(KeyBuf::new()
                .str_fixed(&self.first, 8)
                .str_fixed(&self.middle, 1)
                .str_fixed(&self.last, 12)
                .build()),
            _ => Err(Error::IndexOutOfRange {
                index,
                count: INDEX_COUNT,
            }),
        }
    }

    fn scratch(&self) -> Self {
        Self::default()
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id as u16;
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} / {}", self.first, self.middle, self.last, self.id)
    }
}
