//! The codec is pure and may be shared freely across threads.

use recordio::{frames, varint, RecordReader, RecordWriter, MAX_ENCODABLE_VALUE};
use std::sync::Arc;
use std::thread;

#[test]
fn test_codec_from_many_threads() {
    let handles: Vec<_> = (0..8u64)
        .map(|t| {
            thread::spawn(move || {
                let mut value = t;
                while value <= MAX_ENCODABLE_VALUE {
                    let encoded = varint::encode(value).unwrap();
                    let (decoded, consumed) = varint::decode(&encoded).unwrap();
                    assert_eq!(decoded, value);
                    assert_eq!(consumed, encoded.len());
                    value = value * 3 + 1;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_independent_streams_per_thread() {
    let handles: Vec<_> = (0..4u8)
        .map(|t| {
            thread::spawn(move || {
                let payloads: Vec<Vec<u8>> = (0..100).map(|i| vec![t; i]).collect();

                let mut writer = RecordWriter::new(Vec::new());
                writer.write_records(&payloads).unwrap();
                let bytes = writer.into_inner();

                let mut reader = RecordReader::new(&bytes[..]);
                for expected in &payloads {
                    assert_eq!(&reader.next_record().unwrap().unwrap(), expected);
                }
                bytes
            })
        })
        .collect();

    let streams: Vec<Arc<Vec<u8>>> = handles
        .into_iter()
        .map(|h| Arc::new(h.join().unwrap()))
        .collect();

    // Readers over a shared immutable buffer need no coordination
    let readers: Vec<_> = streams
        .iter()
        .map(|stream| {
            let stream = Arc::clone(stream);
            thread::spawn(move || frames(&stream).count())
        })
        .collect();
    for reader in readers {
        assert_eq!(reader.join().unwrap(), 100);
    }
}
