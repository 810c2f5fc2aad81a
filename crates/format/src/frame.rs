//! In-memory frame encoding.
//!
//! A frame is a varint length prefix followed by exactly that many payload
//! bytes:
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────────┐
//! │ Length (1-6 bytes)   │ Payload (Length bytes)       │
//! └──────────────────────┴──────────────────────────────┘
//! ```
//!
//! A stream is frames back to back with no padding, alignment, checksum, or
//! separator. These helpers work on buffers already held in memory; the
//! `recordio-stream` crate frames over `Read`/`Write`.

use crate::varint;
use recordio_core::{Error, Result};

/// Total size of the frame carrying a payload of `payload_len` bytes.
pub fn frame_len(payload_len: usize) -> Result<usize> {
    let prefix = varint::encode(payload_len as u64)?;
    Ok(prefix.len() + payload_len)
}

/// Append one frame for `payload` to `out`.
///
/// Returns the number of bytes appended.
pub fn encode_frame(payload: &[u8], out: &mut Vec<u8>) -> Result<usize> {
    let prefix = varint::encode(payload.len() as u64)?;
    out.reserve(prefix.len() + payload.len());
    out.extend_from_slice(&prefix);
    out.extend_from_slice(payload);
    Ok(prefix.len() + payload.len())
}

/// Decode the first frame in `bytes`.
///
/// Returns the borrowed payload and the number of bytes consumed.
///
/// # Errors
///
/// - `Error::EndOfStream` if `bytes` is empty
/// - `Error::TruncatedLengthPrefix` / `Error::CorruptLengthPrefix` for a bad prefix
/// - `Error::TruncatedRecord` if fewer payload bytes follow than declared
pub fn decode_frame(bytes: &[u8]) -> Result<(&[u8], usize)> {
    if bytes.is_empty() {
        return Err(Error::EndOfStream);
    }

    let (size, prefix_len) = varint::decode(bytes)?;
    let available = (bytes.len() - prefix_len) as u64;
    if size > available {
        return Err(Error::TruncatedRecord {
            expected: size,
            actual: available,
        });
    }

    let end = prefix_len + size as usize;
    Ok((&bytes[prefix_len..end], end))
}

/// Iterate over the payloads of a buffer holding back-to-back frames.
pub fn frames(bytes: &[u8]) -> FrameIter<'_> {
    FrameIter {
        remaining: bytes,
        failed: false,
    }
}

/// Iterator returned by [`frames`].
///
/// Yields each payload in order. A malformed tail yields one error, after
/// which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> FrameIter<'a> {
    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.remaining
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = Result<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }

        match decode_frame(self.remaining) {
            Ok((payload, consumed)) => {
                self.remaining = &self.remaining[consumed..];
                Some(Ok(payload))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
