//! Fixed-width sortable key construction.

/// Builder for index keys whose raw bytes sort the way the underlying
/// field values do.
///
/// Integers are appended big-endian; strings and byte slices are appended
/// at a fixed width, truncated or zero-padded as needed, so that multiple
/// segments concatenate into a correctly-ordered composite key.
#[derive(Debug, Default)]
pub struct KeyBuf {
    buf: Vec<u8>,
}

impl KeyBuf {
    /// Creates an empty key builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a big-endian u16 segment.
    #[must_use]
    pub fn u16(mut self, value: u16) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Appends a big-endian u32 segment.
    #[must_use]
    pub fn u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Appends a big-endian u64 segment.
    #[must_use]
    pub fn u64(mut self, value: u64) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Appends a string segment of exactly `width` bytes, truncating or
    /// zero-padding the UTF-8 bytes as needed.
    #[must_use]
    pub fn str_fixed(self, value: &str, width: usize) -> Self {
        self.bytes_fixed(value.as_bytes(), width)
    }

    /// Appends a byte segment of exactly `width` bytes, truncating or
    /// zero-padding as needed.
    #[must_use]
    pub fn bytes_fixed(mut self, value: &[u8], width: usize) -> Self {
        let take = value.len().min(width);
        self.buf.extend_from_slice(&value[..take]);
        self.buf.resize(self.buf.len() + (width - take), 0);
        self
    }

    /// Returns the finished key.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}
