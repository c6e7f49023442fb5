//! Buffered I/O engine state.
//!
//! One read buffer and one write buffer per stream, each a fixed-capacity
//! array embedded in the stream record — no separate heap allocation, one
//! owner, freed with the stream.
//!
//! Invariants:
//! - read side: `0 <= offset <= size <= BUFSIZE`
//! - write side: `0 <= offset <= BUFSIZE`
//!
//! Refill and drain are lazy: the read buffer is reloaded only once fully
//! consumed, the write buffer is emptied only once it would overflow (or on
//! an explicit flush/seek/close). The raw I/O itself lives in the `sostdio`
//! crate; this module only does the bookkeeping.

/// Fixed buffer capacity shared by every stream, in bytes.
pub const BUFSIZE: usize = 4096;

// ---------------------------------------------------------------------------
// Read buffer
// ---------------------------------------------------------------------------

/// Read-side buffer: `offset` is the next unconsumed byte, `size` the number
/// of valid bytes loaded by the last refill.
pub struct ReadBuffer {
    data: [u8; BUFSIZE],
    offset: usize,
    size: usize,
}

impl ReadBuffer {
    /// Empty buffer (`offset = size = 0`).
    pub fn new() -> Self {
        Self {
            data: [0u8; BUFSIZE],
            offset: 0,
            size: 0,
        }
    }

    /// True once every loaded byte has been consumed. A drained buffer is
    /// the only state in which a refill may be issued.
    pub fn is_drained(&self) -> bool {
        self.offset == self.size
    }

    /// Bytes loaded but not yet handed to the caller. This is the slack
    /// that seek/tell must discount: the raw descriptor position is this
    /// far ahead of the logical one.
    pub fn unread(&self) -> usize {
        self.size - self.offset
    }

    /// The raw-read destination for a refill. Valid to call only when
    /// drained; the driver reads up to `BUFSIZE` bytes into it and then
    /// calls [`commit_refill`](Self::commit_refill).
    pub fn refill_target(&mut self) -> &mut [u8; BUFSIZE] {
        debug_assert!(self.is_drained());
        &mut self.data
    }

    /// Record a refill of `n` bytes: `size = n`, `offset = 0`.
    pub fn commit_refill(&mut self, n: usize) {
        debug_assert!(n <= BUFSIZE);
        self.size = n;
        self.offset = 0;
    }

    /// Consume the next buffered byte, if any.
    pub fn take(&mut self) -> Option<u8> {
        if self.is_drained() {
            return None;
        }
        let b = self.data[self.offset];
        self.offset += 1;
        Some(b)
    }

    /// Copy the available contiguous run into `dst`, bounded by both the
    /// unread count and `dst.len()`. Returns the number of bytes copied.
    pub fn copy_into(&mut self, dst: &mut [u8]) -> usize {
        let take = dst.len().min(self.unread());
        dst[..take].copy_from_slice(&self.data[self.offset..self.offset + take]);
        self.offset += take;
        take
    }

    /// Discard all buffered read state (`offset = size = 0`). A seek never
    /// reuses read-ahead across the raw reposition.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.size = 0;
    }
}

impl Default for ReadBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Write buffer
// ---------------------------------------------------------------------------

/// Write-side buffer: `offset` counts bytes pending flush.
pub struct WriteBuffer {
    data: [u8; BUFSIZE],
    offset: usize,
}

impl WriteBuffer {
    /// Empty buffer (`offset = 0`).
    pub fn new() -> Self {
        Self {
            data: [0u8; BUFSIZE],
            offset: 0,
        }
    }

    /// True when the next byte would overflow; the driver must drain first.
    pub fn is_full(&self) -> bool {
        self.offset == BUFSIZE
    }

    /// True when nothing is pending flush.
    pub fn is_empty(&self) -> bool {
        self.offset == 0
    }

    /// Number of bytes pending flush.
    pub fn len(&self) -> usize {
        self.offset
    }

    /// The bytes a drain must write out, in order.
    pub fn pending(&self) -> &[u8] {
        &self.data[..self.offset]
    }

    /// Append one byte. Caller must have drained a full buffer first.
    pub fn push(&mut self, byte: u8) {
        debug_assert!(!self.is_full());
        self.data[self.offset] = byte;
        self.offset += 1;
    }

    /// Append as much of `src` as fits, returning the number of bytes
    /// accepted (bounded by the remaining space).
    pub fn copy_from(&mut self, src: &[u8]) -> usize {
        let take = src.len().min(BUFSIZE - self.offset);
        self.data[self.offset..self.offset + take].copy_from_slice(&src[..take]);
        self.offset += take;
        take
    }

    /// Mark the buffer drained (`offset = 0`).
    pub fn clear(&mut self) {
        self.offset = 0;
    }
}

impl Default for WriteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Sticky error flags
// ---------------------------------------------------------------------------

/// Per-direction sticky error flags.
///
/// Each flag records the outcome of the most recent refill/drain of its
/// direction and stays set until a fresh successful operation of that
/// direction clears it. The read flag doubles as the end-of-stream
/// indicator: a refill that returns zero bytes marks it exactly like a
/// failed one, and the stream surface makes no further distinction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorFlags {
    read: bool,
    write: bool,
}

impl ErrorFlags {
    /// Record the outcome of a refill: `ok` clears the read flag, anything
    /// else (zero bytes or a hard error) sets it.
    pub fn record_read(&mut self, ok: bool) {
        self.read = !ok;
    }

    /// Record the outcome of a drain.
    pub fn record_write(&mut self, ok: bool) {
        self.write = !ok;
    }

    /// Read-side flag (also the end-of-stream indicator).
    pub fn read(&self) -> bool {
        self.read
    }

    /// Write-side flag.
    pub fn write(&self) -> bool {
        self.write
    }

    /// Combined error query: true if either direction has failed.
    pub fn any(&self) -> bool {
        self.read || self.write
    }

    /// Clear both flags (clearerr analogue).
    pub fn clear(&mut self) {
        self.read = false;
        self.write = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
