//! Minimal single-index record for sequence and error-path tests.

use spur_core::{Error, Record, Result};

/// The smallest useful record: one u32, one index, a raw big-endian
/// byte codec.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlainId {
    /// Stored value, doubling as the primary key.
    pub id: u32,
}

impl PlainId {
    /// Wraps a value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self { id }
    }
}

impl Record for PlainId {
    fn type_name(&self) -> &'static str {
        "plain"
    }

    fn index_count(&self) -> u8 {
        1
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.id.to_be_bytes().to_vec())
    }

    fn from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let raw: [u8; 4] = bytes
            .try_into()
            .map_err(|_| Error::record(format!("expected 4 bytes, got {}", bytes.len())))?;
        self.id = u32::from_be_bytes(raw);
        Ok(())
    }

    fn index_key(&self, index: u8) -> Result<Vec<u8>> {
        match index {
            0 => Ok(self.id.to_be_bytes().to_vec()),
            _ => Err(Error::IndexOutOfRange { index, count: 1 }),
        }
    }

    fn scratch(&self) -> Self {
        Self::default()
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let rec = PlainId::new(0xDEAD_BEEF);
        let bytes = rec.to_bytes().unwrap();
        let mut parsed = PlainId::default();
        parsed.from_bytes(&bytes).unwrap();
        assert_eq!(parsed, rec);
    }

    #[test]
    fn short_input_rejected() {
        let mut rec = PlainId::default();
        assert!(rec.from_bytes(&[1, 2]).is_err());
    }

    #[test]
    fn assign_id_sets_value() {
        let mut rec = PlainId::default();
        rec.assign_id(7);
        assert_eq!(rec.id, 7);
    }
}
