//! Record writer.
//!
//! The writer frames whole payloads onto a byte sink: the varint length
//! prefix first, then the payload bytes unmodified.

use crate::config::{FramingConfig, FramingCounters};
use recordio_core::{Error, Result};
use recordio_format::varint;
use std::io::Write;
use tracing::{debug, trace, warn};

/// Writes length-prefixed records to a sink.
///
/// No buffering is added on top of the sink; wrap it in a `BufWriter` when
/// writing many small records to a file or socket.
///
/// A writer is single-owner. Every operation takes `&mut self`, so one
/// instance can never be driven from two threads at once.
///
/// # Example
///
/// ```ignore
/// use recordio_stream::RecordWriter;
///
/// let mut writer = RecordWriter::new(Vec::new());
/// writer.write_record(b"hello")?;
/// let bytes = writer.into_inner();
/// assert_eq!(bytes, b"\x05hello");
/// ```
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    /// Underlying byte sink
    sink: W,

    /// Configuration
    config: FramingConfig,

    /// Cumulative counters
    counters: FramingCounters,
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer with the default configuration.
    pub fn new(sink: W) -> Self {
        Self::build(sink, FramingConfig::default())
    }

    /// Create a writer with a custom configuration.
    ///
    /// Returns `Error::InvalidConfig` if the configuration does not validate.
    pub fn with_config(sink: W, config: FramingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(sink, config))
    }

    fn build(sink: W, config: FramingConfig) -> Self {
        debug!(
            max_record_size = config.max_record_size,
            flush_each_record = config.flush_each_record,
            "Created record writer"
        );
        RecordWriter {
            sink,
            config,
            counters: FramingCounters::default(),
        }
    }

    /// Write one record.
    ///
    /// Writes the length prefix (only the produced bytes) followed by the
    /// whole payload. Zero-length payloads are valid and produce a single
    /// `0x00` byte.
    ///
    /// # Errors
    ///
    /// - `Error::RecordTooLarge` if the payload exceeds `max_record_size`;
    ///   nothing is written in that case
    /// - `Error::IoError` if the sink fails; the sink may then hold a partial
    ///   frame
    pub fn write_record(&mut self, payload: &[u8]) -> Result<()> {
        let size = payload.len() as u64;
        if size > self.config.max_record_size {
            warn!(
                size,
                max = self.config.max_record_size,
                "Refusing to frame oversized record"
            );
            return Err(Error::RecordTooLarge {
                size,
                max: self.config.max_record_size,
            });
        }

        let prefix = varint::encode(size)?;
        self.sink.write_all(&prefix)?;
        self.sink.write_all(payload)?;
        self.counters.record(prefix.len(), payload.len());

        trace!(size, prefix_len = prefix.len(), "Wrote record");

        if self.config.flush_each_record {
            self.sink.flush()?;
        }

        Ok(())
    }

    /// Write every record yielded by `records`, in order.
    ///
    /// Stops at the first failure. Returns the number of records written.
    pub fn write_records<I, P>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut written = 0;
        for record in records {
            self.write_record(record.as_ref())?;
            written += 1;
        }
        Ok(written)
    }

    /// Single-byte writes are not supported.
    ///
    /// The writer only frames whole records; this always returns
    /// `Error::UnsupportedOperation`.
    pub fn write_byte(&mut self, _byte: u8) -> Result<()> {
        Err(Error::UnsupportedOperation(
            "single-byte write on a record writer",
        ))
    }

    /// Flush the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Flush and release the sink.
    ///
    /// The sink is dropped when this returns, whether or not the flush
    /// succeeded.
    pub fn close(mut self) -> Result<()> {
        let result = self.sink.flush();
        debug!(
            records = self.counters.records,
            bytes = self.counters.total_bytes(),
            "Closed record writer"
        );
        result.map_err(Error::from)
    }

    /// Cumulative counters for this writer.
    pub fn counters(&self) -> FramingCounters {
        self.counters
    }

    /// Active configuration.
    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    /// Borrow the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Mutably borrow the sink.
    ///
    /// Writing to the sink directly will corrupt the frame stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Unwrap the sink without flushing.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
