//! File-backed round trips.

use crate::common::{init_tracing, random_payloads, TestFile};
use recordio::{frames, Error, FramingConfig, RecordReader, RecordWriter};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

#[test]
fn test_file_round_trip_preserves_order() {
    init_tracing();
    let file = TestFile::new("ordered.rio");
    let payloads = random_payloads(200, 4096);

    file.write_all(&payloads);

    let mut reader = file.reader();
    for (i, expected) in payloads.iter().enumerate() {
        let mut buf = vec![0u8; expected.len()];
        let n = reader.read_record(&mut buf).unwrap();
        assert_eq!(n, expected.len(), "record {}", i);
        assert_eq!(&buf, expected, "record {}", i);
    }
    assert!(matches!(
        reader.read_record(&mut [0u8; 0]),
        Err(Error::EndOfStream)
    ));
    assert_eq!(reader.position(), file.len());
}

#[test]
fn test_file_bytes_match_in_memory_frames() {
    init_tracing();
    let file = TestFile::new("frames.rio");
    let payloads = random_payloads(50, 300);
    file.write_all(&payloads);

    let bytes = std::fs::read(file.path()).unwrap();
    let decoded: Vec<&[u8]> = frames(&bytes).collect::<Result<_, _>>().unwrap();
    assert_eq!(decoded.len(), payloads.len());
    for (got, expected) in decoded.iter().zip(&payloads) {
        assert_eq!(*got, &expected[..]);
    }
}

#[test]
fn test_append_across_writer_sessions() {
    init_tracing();
    let file = TestFile::new("append.rio");

    {
        let mut writer = file.writer();
        writer.write_record(b"session-1").unwrap();
        writer.close().unwrap();
    }
    {
        let handle = OpenOptions::new().append(true).open(file.path()).unwrap();
        let mut writer = RecordWriter::new(BufWriter::new(handle));
        writer.write_record(b"session-2").unwrap();
        writer.write_record(b"").unwrap();
        writer.close().unwrap();
    }

    let mut reader = file.reader();
    let records: Vec<Vec<u8>> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        records,
        vec![b"session-1".to_vec(), b"session-2".to_vec(), Vec::new()]
    );
}

#[test]
fn test_flush_each_record_visible_before_close() {
    init_tracing();
    let file = TestFile::new("flushed.rio");
    let config = FramingConfig::new().with_flush_each_record(true);

    let handle = File::create(file.path()).unwrap();
    let mut writer = RecordWriter::with_config(BufWriter::new(handle), config).unwrap();
    writer.write_record(b"durable").unwrap();

    // Still open, but the frame already reached the file
    let mut reader = RecordReader::new(BufReader::new(File::open(file.path()).unwrap()));
    assert_eq!(reader.next_record().unwrap().unwrap(), b"durable");
    assert!(reader.next_record().unwrap().is_none());

    writer.close().unwrap();
}

#[test]
fn test_large_record() {
    init_tracing();
    let file = TestFile::new("large.rio");
    let payload: Vec<u8> = (0..3 * 1024 * 1024).map(|i| (i % 256) as u8).collect();
    file.write_all(&[payload.clone()]);

    assert_eq!(file.len(), payload.len() as u64 + 4);

    let mut reader = file.reader();
    let mut buf = vec![0u8; payload.len()];
    assert_eq!(reader.read_record(&mut buf).unwrap(), payload.len());
    assert_eq!(buf, payload);
    reader.close();
}
