//! Error types for record framing
//!
//! This module defines every error the codec and the stream adapters can
//! surface. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! None of these errors are recovered internally. After any framing error the
//! underlying stream is left at an indeterminate position and must not be
//! reused without external resynchronization.

use std::io;
use thiserror::Error;

/// Result type alias for record framing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for record framing
#[derive(Debug, Error)]
pub enum Error {
    /// Length prefix used up the whole byte budget without terminating
    #[error("Corrupt record length: no terminating byte within {read} prefix bytes")]
    CorruptLengthPrefix {
        /// Prefix bytes consumed before giving up
        read: usize,
    },

    /// Source ended before the length prefix resolved
    #[error("Corrupt record length at end of stream: prefix truncated after {read} bytes")]
    TruncatedLengthPrefix {
        /// Prefix bytes available before the stream ended
        read: usize,
    },

    /// Fewer payload bytes were available than the prefix declared
    #[error("Truncated record: expected {expected} bytes, got {actual}")]
    TruncatedRecord {
        /// Declared payload length
        expected: u64,
        /// Payload bytes actually read
        actual: u64,
    },

    /// Source was already exhausted when a record read was attempted
    #[error("Reached the end of stream")]
    EndOfStream,

    /// Single-byte access on an adapter that only frames whole records
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Value cannot be represented by the varint scheme
    #[error("Value out of range: {value} exceeds maximum encodable {max}")]
    ValueOutOfRange {
        /// Rejected value
        value: u64,
        /// Largest encodable value
        max: u64,
    },

    /// Record length above the configured limit
    #[error("Record too large: {size} bytes exceeds limit of {max}")]
    RecordTooLarge {
        /// Record length
        size: u64,
        /// Configured maximum
        max: u64,
    },

    /// Destination buffer cannot hold the record
    #[error("Buffer too small: record needs {needed} bytes, buffer holds {available}")]
    BufferTooSmall {
        /// Record length
        needed: usize,
        /// Destination buffer length
        available: usize,
    },

    /// Invalid framing configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error from the underlying source or sink
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Whether this error means the byte stream itself is malformed.
    ///
    /// I/O failures, caller misuse, and clean end-of-stream are not corruption.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::CorruptLengthPrefix { .. }
                | Error::TruncatedLengthPrefix { .. }
                | Error::TruncatedRecord { .. }
                | Error::RecordTooLarge { .. }
        )
    }

    /// Whether this is a clean end of stream at a frame boundary.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream)
    }
}
