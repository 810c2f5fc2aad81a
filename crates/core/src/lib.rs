//! Core types for RecordIO
//!
//! This crate defines the foundations shared by the codec and the stream
//! adapters:
//! - Error: Error type for every framing, codec, and I/O failure
//! - Limits: Wire-format constants for the varint length prefix

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;

pub use error::{Error, Result};
pub use limits::{DEFAULT_MAX_RECORD_SIZE, MAX_ENCODABLE_VALUE, MAX_VARINT_LEN};
