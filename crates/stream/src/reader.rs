//! Record reader.
//!
//! The reader recovers whole payloads from a byte source. For every record it
//! pulls the length prefix one byte at a time, decodes it, then reads exactly
//! that many payload bytes.

use crate::config::{FramingConfig, FramingCounters};
use recordio_core::limits::{CONTINUATION_BIT, MAX_VARINT_LEN};
use recordio_core::{Error, Result};
use recordio_format::varint;
use std::io::{self, Read};
use tracing::{debug, trace, warn};

/// Up-front allocation for an owned payload; larger records grow as bytes arrive.
const INITIAL_PAYLOAD_CAPACITY: usize = 64 * 1024;

/// Reads length-prefixed records from a source.
///
/// The prefix is read one byte at a time, so an unbuffered file or socket
/// should be wrapped in a `BufReader`.
///
/// After any error the source is at an indeterminate position inside the
/// frame stream. There is no resynchronization; drop the reader.
///
/// # Example
///
/// ```ignore
/// use recordio_stream::RecordReader;
///
/// let mut reader = RecordReader::new(&b"\x05hello"[..]);
/// let mut buf = [0u8; 16];
/// let n = reader.read_record(&mut buf)?;
/// assert_eq!(&buf[..n], b"hello");
/// ```
#[derive(Debug)]
pub struct RecordReader<R: Read> {
    /// Underlying byte source
    source: R,

    /// Configuration
    config: FramingConfig,

    /// Cumulative counters
    counters: FramingCounters,

    /// Bytes consumed from the source so far
    position: u64,
}

impl<R: Read> RecordReader<R> {
    /// Create a reader with the default configuration.
    pub fn new(source: R) -> Self {
        Self::build(source, FramingConfig::default())
    }

    /// Create a reader with a custom configuration.
    ///
    /// Returns `Error::InvalidConfig` if the configuration does not validate.
    pub fn with_config(source: R, config: FramingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(source, config))
    }

    fn build(source: R, config: FramingConfig) -> Self {
        debug!(
            max_record_size = config.max_record_size,
            "Created record reader"
        );
        RecordReader {
            source,
            config,
            counters: FramingCounters::default(),
            position: 0,
        }
    }

    /// Read the next record into `buf`.
    ///
    /// Returns the record length; the payload occupies `buf[..len]`. The
    /// buffer is never resized.
    ///
    /// # Errors
    ///
    /// - `Error::EndOfStream` if the source is exhausted at a frame boundary
    /// - `Error::TruncatedLengthPrefix` if the source ends inside a prefix
    /// - `Error::CorruptLengthPrefix` if ten prefix bytes pass without a terminator
    /// - `Error::RecordTooLarge` if the declared length exceeds `max_record_size`
    /// - `Error::BufferTooSmall` if `buf` is shorter than the declared length
    /// - `Error::TruncatedRecord` if the source ends inside the payload
    pub fn read_record(&mut self, buf: &mut [u8]) -> Result<usize> {
        let (size, prefix_len) = self.read_prefix()?.ok_or(Error::EndOfStream)?;
        let size = self.check_size(size)?;
        if size > buf.len() {
            return Err(Error::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }

        self.read_payload(&mut buf[..size])?;
        self.counters.record(prefix_len, size);
        trace!(size, prefix_len, "Read record");
        Ok(size)
    }

    /// Read the next record into a freshly allocated buffer.
    ///
    /// Returns `Ok(None)` when the source is exhausted at a frame boundary.
    /// Every other condition fails the same way as [`read_record`](Self::read_record).
    ///
    /// The buffer grows with the bytes actually read, so a corrupt prefix
    /// declaring a huge length fails with `Error::TruncatedRecord` at the end
    /// of the source instead of allocating the declared size up front.
    pub fn next_record(&mut self) -> Result<Option<Vec<u8>>> {
        let Some((size, prefix_len)) = self.read_prefix()? else {
            return Ok(None);
        };
        let size = self.check_size(size)?;

        let payload = self.read_payload_to_vec(size)?;
        self.counters.record(prefix_len, size);
        trace!(size, prefix_len, "Read record");
        Ok(Some(payload))
    }

    /// Iterate over the remaining records.
    ///
    /// The iterator ends at a clean end of stream, or after yielding the
    /// first error.
    pub fn records(&mut self) -> Records<'_, R> {
        Records {
            reader: self,
            done: false,
        }
    }

    /// Single-byte reads are not supported.
    ///
    /// The reader only recovers whole records; this always returns
    /// `Error::UnsupportedOperation` and consumes nothing.
    pub fn read_byte(&mut self) -> Result<u8> {
        Err(Error::UnsupportedOperation(
            "single-byte read on a record reader",
        ))
    }

    /// Cumulative counters for this reader.
    pub fn counters(&self) -> FramingCounters {
        self.counters
    }

    /// Active configuration.
    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    /// Bytes consumed from the source so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Borrow the source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Mutably borrow the source.
    ///
    /// Reading from the source directly will desynchronize the frame stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Unwrap the source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Release the source.
    pub fn close(self) {
        debug!(
            records = self.counters.records,
            bytes = self.position,
            "Closed record reader"
        );
    }

    /// Accumulate and decode one length prefix.
    ///
    /// Returns `Ok(None)` if the source ends before the first prefix byte.
    fn read_prefix(&mut self) -> Result<Option<(u64, usize)>> {
        let start = self.position;
        let mut prefix = [0u8; MAX_VARINT_LEN];

        for len in 0..MAX_VARINT_LEN {
            match self.read_one()? {
                Some(byte) => {
                    prefix[len] = byte;
                    if byte & CONTINUATION_BIT == 0 {
                        let (size, consumed) = varint::decode(&prefix[..=len])?;
                        return Ok(Some((size, consumed)));
                    }
                }
                None if len == 0 => return Ok(None),
                None => {
                    warn!(
                        offset = start,
                        read = len,
                        "Stream ended inside record length prefix"
                    );
                    return Err(Error::TruncatedLengthPrefix { read: len });
                }
            }
        }

        warn!(offset = start, "Record length prefix did not terminate");
        Err(Error::CorruptLengthPrefix {
            read: MAX_VARINT_LEN,
        })
    }

    fn check_size(&self, size: u64) -> Result<usize> {
        let max = self.config.max_record_size;
        if size > max {
            warn!(
                offset = self.position,
                size, max, "Declared record length exceeds limit"
            );
            return Err(Error::RecordTooLarge { size, max });
        }
        usize::try_from(size).map_err(|_| Error::RecordTooLarge {
            size,
            max: usize::MAX as u64,
        })
    }

    fn read_one(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn read_payload_to_vec(&mut self, size: usize) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(size.min(INITIAL_PAYLOAD_CAPACITY));
        let result = Read::by_ref(&mut self.source)
            .take(size as u64)
            .read_to_end(&mut payload);
        self.position += payload.len() as u64;
        result?;

        if payload.len() < size {
            warn!(
                offset = self.position,
                expected = size,
                actual = payload.len(),
                "Stream ended inside record payload"
            );
            return Err(Error::TruncatedRecord {
                expected: size as u64,
                actual: payload.len() as u64,
            });
        }
        Ok(payload)
    }

    fn read_payload(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => {
                    warn!(
                        offset = self.position,
                        expected = buf.len(),
                        actual = filled,
                        "Stream ended inside record payload"
                    );
                    return Err(Error::TruncatedRecord {
                        expected: buf.len() as u64,
                        actual: filled as u64,
                    });
                }
                Ok(n) => {
                    filled += n;
                    self.position += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Iterator over the records of a [`RecordReader`].
pub struct Records<'a, R: Read> {
    reader: &'a mut RecordReader<R>,
    done: bool,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
