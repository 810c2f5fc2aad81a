//! Wire format for RecordIO streams
//!
//! - `varint`: chunked varint codec used for record length prefixes
//! - `frame`: length-prefixed frames over in-memory buffers
//!
//! Everything here is pure: no state, no I/O. Functions may be called
//! concurrently from any number of threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod frame;
pub mod varint;

pub use frame::{decode_frame, encode_frame, frame_len, frames, FrameIter};
pub use varint::{decode, encode, encoded_len, EncodedVarint};
