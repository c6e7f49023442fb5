//! Integration test: process-pipe streams (popen/pclose analogue).
//!
//! Spawns real `/bin/sh` children and streams their stdin/stdout through
//! the buffered engine.
//!
//! Run: cargo test -p sostdio --test pipe_stream_test

use std::fs;

use sostdio::{BUFSIZE, Stream, StreamError};
use tempfile::TempDir;

fn scratch() -> TempDir {
    tempfile::tempdir().expect("scratch dir")
}

// ---------------------------------------------------------------------------
// Read direction: parent consumes the child's stdout
// ---------------------------------------------------------------------------

#[test]
fn read_direction_streams_child_output() {
    let mut s = Stream::open_process("printf abc", "r").unwrap();
    assert_eq!(s.get_byte(), Some(b'a'));
    assert_eq!(s.get_byte(), Some(b'b'));
    assert_eq!(s.get_byte(), Some(b'c'));
    assert_eq!(s.get_byte(), None);
    assert!(s.eof());
    s.close().unwrap();
}

#[test]
fn read_direction_block_transfer() {
    let mut s = Stream::open_process("printf 'one two three'", "r").unwrap();
    let mut dst = [0u8; 13];
    assert_eq!(s.read_elems(&mut dst, 1, 13).unwrap(), 13);
    assert_eq!(&dst, b"one two three");
    s.close().unwrap();
}

#[test]
fn silent_child_reports_end_of_stream() {
    let mut s = Stream::open_process("exit 0", "r").unwrap();
    assert_eq!(s.get_byte(), None);
    assert!(s.eof());
    s.close().unwrap();
}

// ---------------------------------------------------------------------------
// Write direction: parent feeds the child's stdin
// ---------------------------------------------------------------------------

#[test]
fn write_direction_feeds_child_stdin() {
    let dir = scratch();
    let sink = dir.path().join("sink.bin");
    let cmd = format!("cat > {}", sink.display());

    let mut s = Stream::open_process(&cmd, "w").unwrap();
    let data = b"piped through the shell";
    for &b in data {
        s.put_byte(b).unwrap();
    }
    // close drains the buffer, closes the pipe end, and waits for cat.
    s.close().unwrap();

    assert_eq!(fs::read(&sink).unwrap(), data);
}

#[test]
fn write_direction_crosses_buffer_reloads() {
    let dir = scratch();
    let sink = dir.path().join("large.bin");
    let cmd = format!("cat > {}", sink.display());

    let data: Vec<u8> = (0..BUFSIZE * 3).map(|i| (i % 251) as u8).collect();
    let mut s = Stream::open_process(&cmd, "w").unwrap();
    assert_eq!(s.write_elems(&data, 1024, data.len() / 1024).unwrap(), data.len() / 1024);
    s.close().unwrap();

    assert_eq!(fs::read(&sink).unwrap(), data);
}

// ---------------------------------------------------------------------------
// Direction validation and close semantics
// ---------------------------------------------------------------------------

#[test]
fn unsupported_direction_fails_before_spawn() {
    assert!(matches!(
        Stream::open_process("true", "rw"),
        Err(StreamError::InvalidMode)
    ));
    assert!(matches!(
        Stream::open_process("true", ""),
        Err(StreamError::InvalidMode)
    ));
}

#[test]
fn close_reaps_child_even_when_output_unread() {
    // The child's exit status is not surfaced; close only fails if the
    // wait itself fails.
    let s = Stream::open_process("printf unread; exit 3", "r").unwrap();
    s.close().unwrap();
}
