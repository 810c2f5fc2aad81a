//! Framing configuration.
//!
//! This module provides configuration shared by the record reader and writer.

use recordio_core::limits::{DEFAULT_MAX_RECORD_SIZE, MAX_ENCODABLE_VALUE};

/// Framing configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramingConfig {
    /// Largest record accepted, in bytes (default: 2^42 - 1, the largest
    /// length the prefix can carry).
    ///
    /// The writer refuses to frame longer payloads and the reader rejects
    /// longer declared lengths before touching the payload.
    pub max_record_size: u64,

    /// Flush the sink after every record (default: false).
    ///
    /// Only affects the writer.
    pub flush_each_record: bool,
}

impl Default for FramingConfig {
    fn default() -> Self {
        FramingConfig {
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            flush_each_record: false,
        }
    }
}

impl FramingConfig {
    /// Create a new framing configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum record size (builder pattern).
    pub fn with_max_record_size(mut self, size: u64) -> Self {
        self.max_record_size = size;
        self
    }

    /// Set flush-per-record behavior (builder pattern).
    pub fn with_flush_each_record(mut self, flush: bool) -> Self {
        self.flush_each_record = flush;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_record_size == 0 {
            return Err(ConfigError::MaxRecordSizeZero);
        }
        if self.max_record_size > MAX_ENCODABLE_VALUE {
            return Err(ConfigError::MaxRecordSizeExceedsEncodable {
                size: self.max_record_size,
                max: MAX_ENCODABLE_VALUE,
            });
        }
        Ok(())
    }

    /// Create a configuration optimized for testing (small records).
    pub fn for_testing() -> Self {
        FramingConfig {
            max_record_size: 64 * 1024,
            flush_each_record: true,
        }
    }
}

/// Framing configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Maximum record size is zero.
    #[error("Maximum record size must be at least 1 byte")]
    MaxRecordSizeZero,

    /// Maximum record size cannot be expressed as a length prefix.
    #[error("Maximum record size {size} exceeds largest encodable length {max}")]
    MaxRecordSizeExceedsEncodable {
        /// Configured size
        size: u64,
        /// Largest encodable length
        max: u64,
    },
}

impl From<ConfigError> for recordio_core::Error {
    fn from(e: ConfigError) -> Self {
        recordio_core::Error::InvalidConfig(e.to_string())
    }
}

/// Cumulative framing counters.
///
/// These counters accumulate over the lifetime of a reader or writer and are
/// never reset. Only completed records are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramingCounters {
    /// Records framed
    pub records: u64,
    /// Payload bytes framed
    pub payload_bytes: u64,
    /// Length prefix bytes framed
    pub prefix_bytes: u64,
}

impl FramingCounters {
    /// Total bytes on the wire (prefixes plus payloads).
    pub fn total_bytes(&self) -> u64 {
        self.prefix_bytes + self.payload_bytes
    }

    pub(crate) fn record(&mut self, prefix_len: usize, payload_len: usize) {
        self.records += 1;
        self.prefix_bytes += prefix_len as u64;
        self.payload_bytes += payload_len as u64;
    }
}
