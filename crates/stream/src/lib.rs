//! Record framing over byte streams
//!
//! This crate adapts `std::io` sources and sinks into record streams:
//!
//! - `writer`: RecordWriter frames whole payloads onto a `Write` sink
//! - `reader`: RecordReader recovers whole payloads from a `Read` source
//! - `config`: FramingConfig, ConfigError, FramingCounters
//!
//! Adapters own their source/sink and are single-threaded. Nothing is
//! retried; every I/O failure and framing violation surfaces as a
//! `recordio_core::Error`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod reader;
pub mod writer;

pub use config::{ConfigError, FramingConfig, FramingCounters};
pub use reader::{RecordReader, Records};
pub use writer::RecordWriter;
