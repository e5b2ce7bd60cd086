//! Engine configuration.

/// Configuration for opening a database.
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of record operations per write transaction.
    ///
    /// Long-running `put`/`add`/`delete` calls are split into successive
    /// write transactions of at most this many record operations. A low
    /// value pays the table-resolution and commit cost too often; a high
    /// value congests uncommitted pages. The default was tuned empirically
    /// against a 50,000-record workload.
    pub chunk_size: usize,

    /// Cache size in bytes handed to the redb builder, if set.
    pub cache_size: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            chunk_size: 12_500,
            cache_size: None,
        }
    }
}

impl Options {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of record operations per write transaction.
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub const fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the storage cache size in bytes.
    #[must_use]
    pub const fn cache_size(mut self, bytes: usize) -> Self {
        self.cache_size = Some(bytes);
        self
    }
}
