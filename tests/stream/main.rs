//! Integration tests for record streams.
//!
//! These tests exercise RecordWriter and RecordReader over real files and
//! shared threads, things the per-crate unit tests cannot cover:
//! - write → close → reopen → read through buffered file handles
//! - corruption and truncation of persisted streams
//! - concurrent use of the pure codec

#[path = "../common/mod.rs"]
mod common;

mod codec_concurrency;
mod file_round_trip;
