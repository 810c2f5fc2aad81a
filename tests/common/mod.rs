//! Shared test utilities for integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recordio::{RecordReader, RecordWriter};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Payload generation
// ============================================================================

/// Fixed seed so failures reproduce.
pub const TEST_SEED: u64 = 0x5EED_F00D_CAFE_0001;

/// Deterministic payloads with lengths drawn from `0..max_len`.
pub fn random_payloads(count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(TEST_SEED);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..max_len);
            let mut payload = vec![0u8; len];
            rng.fill(&mut payload[..]);
            payload
        })
        .collect()
}

// ============================================================================
// TestFile - temp-dir backed record file
// ============================================================================

/// A record file inside its own temporary directory.
pub struct TestFile {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestFile {
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(name);
        TestFile { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&self) -> RecordWriter<BufWriter<File>> {
        RecordWriter::new(BufWriter::new(File::create(&self.path).unwrap()))
    }

    pub fn reader(&self) -> RecordReader<BufReader<File>> {
        RecordReader::new(BufReader::new(File::open(&self.path).unwrap()))
    }

    /// Write `payloads` and close the file.
    pub fn write_all(&self, payloads: &[Vec<u8>]) {
        let mut writer = self.writer();
        writer.write_records(payloads).unwrap();
        writer.close().unwrap();
    }

    pub fn len(&self) -> u64 {
        std::fs::metadata(&self.path).unwrap().len()
    }
}
