//! Integration test: close/drop lifecycle.
//!
//! Close must drain pending writes before releasing the descriptor, and a
//! failed drain must surface without the descriptor being released. Drop
//! is the best-effort fallback for streams never explicitly closed.
//!
//! Run: cargo test -p sostdio --test close_semantics_test

use std::fs;

use sostdio::{Stream, StreamError, Whence, sys};
use tempfile::TempDir;

fn scratch() -> TempDir {
    tempfile::tempdir().expect("scratch dir")
}

fn path_of(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Close drains first
// ---------------------------------------------------------------------------

#[test]
fn close_flushes_pending_writes() {
    let dir = scratch();
    let path = path_of(&dir, "close_flush.bin");

    let mut s = Stream::open(&path, "w").unwrap();
    let data = b"pending at close";
    for &b in data {
        s.put_byte(b).unwrap();
    }
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    s.close().unwrap();
    assert_eq!(fs::read(&path).unwrap(), data);
}

#[test]
fn failed_drain_fails_close_and_keeps_descriptor() {
    let dir = scratch();
    let path = path_of(&dir, "close_fail.bin");
    fs::write(&path, b"existing").unwrap();

    // Buffered writes on a read-only descriptor: the drain at close fails.
    let mut s = Stream::open(&path, "r").unwrap();
    s.put_byte(b'x').unwrap();
    let fd = s.fd();
    match s.close() {
        Err(StreamError::Write(_)) => {}
        other => panic!("expected drain failure, got {other:?}"),
    }

    // The descriptor was deliberately not released; it still answers a
    // position query, and nothing reached the file.
    assert!(sys::sys_lseek(fd, 0, Whence::Cur.to_raw()).is_ok());
    assert_eq!(fs::read(&path).unwrap(), b"existing");
    sys::sys_close(fd).unwrap();
}

// ---------------------------------------------------------------------------
// Drop fallback
// ---------------------------------------------------------------------------

#[test]
fn drop_flushes_and_releases() {
    let dir = scratch();
    let path = path_of(&dir, "dropped.bin");
    let data = b"flushed by drop";

    {
        let mut s = Stream::open(&path, "w").unwrap();
        for &b in data {
            s.put_byte(b).unwrap();
        }
        // No explicit close: Drop drains and releases.
    }
    assert_eq!(fs::read(&path).unwrap(), data);
}

#[test]
fn drop_reaps_pipe_child() {
    let dir = scratch();
    let sink = dir.path().join("drop_sink.bin");
    let cmd = format!("cat > {}", sink.display());

    {
        let mut s = Stream::open_process(&cmd, "w").unwrap();
        s.put_byte(b'z').unwrap();
    }
    // Drop drained, closed the pipe, and waited for cat.
    assert_eq!(fs::read(&sink).unwrap(), b"z");
}
