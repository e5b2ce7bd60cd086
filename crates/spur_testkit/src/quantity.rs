//! Example record: a number paired with its English spelling.

use std::fmt;

use serde::{Deserialize, Serialize};
use spur_core::{Error, Record, Result};

use crate::key::KeyBuf;
use crate::words;

/// Primary index: numeric id.
pub const IDX_QUANTITY_ID: u8 = 0;
/// Secondary index: the encoded English spelling.
pub const IDX_QUANTITY_WORDS: u8 = 1;

const INDEX_COUNT: u8 = 2;

/// Stores an unsigned integer together with its encoded English word
/// form. Convenient for index tests: records can be generated
/// programmatically and the two indexes sort differently.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    /// Numeric value, used as primary key.
    pub id: u32,
    /// Rank-byte encoding of the English spelling (see [`words`]).
    pub val: Vec<u8>,
}

impl Quantity {
    /// Builds the record for a value, spelling it as words. Values above
    /// the spellable range get an empty word key.
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self {
            id,
            val: words::encode(id).unwrap_or_default(),
        }
    }

    /// A record with only the primary key populated, for lookups and
    /// deletes by id.
    #[must_use]
    pub fn with_id(id: u32) -> Self {
        Self { id, val: Vec::new() }
    }
}

impl Record for Quantity {
    fn type_name(&self) -> &'static str {
        "quantity"
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
            IDX_QUANTITY_ID => Ok(KeyBuf::new().u32(self.id).build()),
            IDX_QUANTITY_WORDS => Ok(KeyBuf::new().bytes_fixed(&self.val, 12).build()),
            _ => Err(Error::IndexOutOfRange {
                index,
                count: INDEX_COUNT,
            }),
        }
    }

    fn scratch(&self) -> Self {
        Self::default()
    }

    fn assign_id(&mut self, _id: u64) {
        // Ids are application-managed for this type; the sequence value
        // handed out by `add` is deliberately ignored.
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>11} : {}]", self.id, words::decode(&self.val))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_round_trip() {
        let quantity = Quantity::new(99);
        let bytes = quantity.to_bytes().unwrap();
        let mut parsed = Quantity::default();
        parsed.from_bytes(&bytes).unwrap();
        assert_eq!(parsed, quantity);
        assert_eq!(words::decode(&parsed.val), "ninety nine");
    }

    #[test]
    fn word_key_is_fixed_width() {
        let quantity = Quantity::new(6);
        let key = quantity.index_key(IDX_QUANTITY_WORDS).unwrap();
        assert_eq!(key.len(), 12);
    }

    #[test]
    fn display_decodes_words() {
        let quantity = Quantity::new(42);
        assert_eq!(quantity.to_string(), "[         42 : forty two]");
    }
}
