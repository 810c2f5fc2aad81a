//! Chunked varint codec for record length prefixes.
//!
//! # Byte Layout
//!
//! Each byte carries 7 data bits, least significant group first. The high bit
//! is the continuation flag and is set on every byte except the last.
//!
//! ```text
//! value < 2^7   : [b0]
//! value < 2^14  : [b0|C][b1]
//! value < 2^21  : [b0|C][b1|C][b2]
//! value < 2^28  : [b0|C][b1|C][b2|C][b3]
//! value < 2^35  : [b0|C][b1|C][b2|C][b3|C][b4]
//! value < 2^42  : [b0|C][b1|C][b2|C][b3|C][b4|C][b5]
//! ```
//!
//! # Chunks
//!
//! The decoder groups bytes into chunks of four (28 bits). A chunk closes after
//! its fourth byte whatever that byte's continuation flag says, and the chunks
//! are combined as `c0 | c1 << 28 | c2 << 56`. Bits shifted past bit 63 are
//! dropped. This layout is part of the wire format; do not replace it with a
//! generic LEB128 loop.

use recordio_core::limits::{
    BITS_PER_BYTE, CHUNK_BITS, CHUNK_BYTES, CONTINUATION_BIT, MAX_CHUNKS, MAX_ENCODABLE_VALUE,
    MAX_VARINT_LEN, PAYLOAD_MASK,
};
use recordio_core::{Error, Result};
use std::fmt;
use std::ops::Deref;

/// An encoded length prefix.
///
/// Holds a fixed-capacity scratch buffer plus the number of bytes actually
/// produced. Only [`as_bytes`](Self::as_bytes) is significant; the tail of the
/// buffer is padding.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EncodedVarint {
    buf: [u8; MAX_VARINT_LEN],
    len: u8,
}

impl EncodedVarint {
    /// The produced bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Number of produced bytes (1 to 6).
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; every encoding has at least one byte.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Deref for EncodedVarint {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for EncodedVarint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for EncodedVarint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedVarint").field(&self.as_bytes()).finish()
    }
}

/// Number of bytes [`encode`] produces for `value`.
///
/// Returns `None` for values above [`MAX_ENCODABLE_VALUE`].
pub const fn encoded_len(value: u64) -> Option<usize> {
    if value < 1 << 7 {
        Some(1)
    } else if value < 1 << 14 {
        Some(2)
    } else if value < 1 << 21 {
        Some(3)
    } else if value < 1 << 28 {
        Some(4)
    } else if value < 1 << 35 {
        Some(5)
    } else if value <= MAX_ENCODABLE_VALUE {
        Some(6)
    } else {
        None
    }
}

/// Encode `value` as a length prefix.
///
/// # Errors
///
/// Returns `Error::ValueOutOfRange` for values at or above 2^42, which the
/// six-byte layout cannot carry.
pub fn encode(value: u64) -> Result<EncodedVarint> {
    let len = encoded_len(value).ok_or(Error::ValueOutOfRange {
        value,
        max: MAX_ENCODABLE_VALUE,
    })?;

    let mut buf = [0u8; MAX_VARINT_LEN];
    for (i, slot) in buf[..len].iter_mut().enumerate() {
        let bits = (value >> (BITS_PER_BYTE * i as u32)) as u8 & PAYLOAD_MASK;
        *slot = if i + 1 < len {
            bits | CONTINUATION_BIT
        } else {
            bits
        };
    }

    Ok(EncodedVarint {
        buf,
        len: len as u8,
    })
}

/// Decode a length prefix from the front of `bytes`.
///
/// Returns `(value, consumed)`. Reading stops at the first byte with the
/// continuation flag clear; bytes after it are never touched. At most
/// [`MAX_VARINT_LEN`] bytes are examined.
///
/// # Errors
///
/// - `Error::CorruptLengthPrefix` if the first `MAX_VARINT_LEN` bytes all carry
///   the continuation flag
/// - `Error::TruncatedLengthPrefix` if `bytes` ends before a terminating byte
pub fn decode(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut chunks = [0u64; MAX_CHUNKS];
    let mut chunk_count = 0usize;
    let mut accumulator = 0u64;
    let mut position = 0usize;

    for (i, &byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
        accumulator |= u64::from(byte & PAYLOAD_MASK) << (BITS_PER_BYTE * position as u32);
        position += 1;

        if position == CHUNK_BYTES {
            chunks[chunk_count] = accumulator;
            chunk_count += 1;
            accumulator = 0;
            position = 0;
        }

        if byte & CONTINUATION_BIT == 0 {
            if position != 0 {
                chunks[chunk_count] = accumulator;
                chunk_count += 1;
            }
            return Ok((combine(&chunks[..chunk_count]), i + 1));
        }
    }

    if bytes.len() >= MAX_VARINT_LEN {
        Err(Error::CorruptLengthPrefix {
            read: MAX_VARINT_LEN,
        })
    } else {
        Err(Error::TruncatedLengthPrefix { read: bytes.len() })
    }
}

fn combine(chunks: &[u64]) -> u64 {
    match chunks {
        [c0] => *c0,
        [c0, c1] => c0 | c1 << CHUNK_BITS,
        [c0, c1, c2, ..] => c0 | c1 << CHUNK_BITS | c2 << (2 * CHUNK_BITS),
        [] => 0,
    }
}
