//! Wire limits for the record framing format
//!
//! These constants define the byte layout of the length prefix. They are part
//! of the wire format and cannot change without breaking existing streams.

/// Maximum number of bytes a length prefix may occupy.
///
/// Also the capacity of the scratch buffer used to encode and accumulate
/// prefixes.
pub const MAX_VARINT_LEN: usize = 10;

/// High bit of a prefix byte: set when another prefix byte follows.
pub const CONTINUATION_BIT: u8 = 0x80;

/// Low seven data bits of a prefix byte.
pub const PAYLOAD_MASK: u8 = 0x7F;

/// Data bits carried by one prefix byte.
pub const BITS_PER_BYTE: u32 = 7;

/// Prefix bytes grouped into one decode chunk.
pub const CHUNK_BYTES: usize = 4;

/// Data bits carried by one full chunk.
pub const CHUNK_BITS: u32 = BITS_PER_BYTE * CHUNK_BYTES as u32;

/// Most chunks a prefix of `MAX_VARINT_LEN` bytes can produce.
pub const MAX_CHUNKS: usize = (MAX_VARINT_LEN + CHUNK_BYTES - 1) / CHUNK_BYTES;

/// Largest value the encoder accepts (2^42 - 1).
///
/// The encoder emits at most six bytes, one full chunk plus two spill bytes,
/// so 42 data bits is the ceiling.
pub const MAX_ENCODABLE_VALUE: u64 = (1 << 42) - 1;

/// Default cap on a single record's length: the whole encodable range.
pub const DEFAULT_MAX_RECORD_SIZE: u64 = MAX_ENCODABLE_VALUE;
