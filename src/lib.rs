//! RecordIO - length-prefixed binary record framing
//!
//! A RecordIO stream is a sequence of frames. Each frame is the payload length,
//! encoded as a chunked varint, followed by exactly that many payload bytes.
//! There is no padding, checksum, or separator.
//!
//! # Quick Start
//!
//! ```ignore
//! use recordio::{RecordReader, RecordWriter};
//!
//! let mut writer = RecordWriter::new(Vec::new());
//! writer.write_record(b"first")?;
//! writer.write_record(b"second")?;
//! let bytes = writer.into_inner();
//!
//! let mut reader = RecordReader::new(&bytes[..]);
//! while let Some(record) = reader.next_record()? {
//!     // Process record
//! }
//! ```
//!
//! # Architecture
//!
//! - [`varint`] encodes and decodes length prefixes (pure, no I/O)
//! - [`frame`] frames payloads held in memory
//! - [`RecordWriter`] / [`RecordReader`] frame over `std::io` sinks and sources

pub use recordio_core::limits;
pub use recordio_core::{
    Error, Result, DEFAULT_MAX_RECORD_SIZE, MAX_ENCODABLE_VALUE, MAX_VARINT_LEN,
};
pub use recordio_format::{frame, varint};
pub use recordio_format::{decode_frame, encode_frame, frame_len, frames, EncodedVarint, FrameIter};
pub use recordio_stream::{
    ConfigError, FramingConfig, FramingCounters, RecordReader, RecordWriter, Records,
};
