//! The buffered stream.
//!
//! `Stream` owns one descriptor, one read buffer, and one write buffer,
//! and drives the raw capability layer against the pure bookkeeping in
//! `sostdio-core`. All operations are synchronous and single-threaded;
//! callers sharing a stream must serialize externally.

use sostdio_core::buffer::{ErrorFlags, ReadBuffer, WriteBuffer};
use sostdio_core::cursor;
use sostdio_core::mode::{OpenMode, Whence};

use crate::error::{Errno, Result, StreamError};
use crate::sys;

/// Permission bits for files created by `O_CREAT` opens.
const CREATE_MODE: u32 = 0o644;

/// A buffered stream over an owned file descriptor.
///
/// Created by [`Stream::open`] (file) or [`Stream::open_process`] (shell
/// pipe). The descriptor is released exactly once: by [`Stream::close`], or
/// by `Drop` as a best-effort fallback when the stream is leaked without an
/// explicit close.
pub struct Stream {
    /// Owned descriptor; -1 once released.
    fd: i32,
    rbuf: ReadBuffer,
    wbuf: WriteBuffer,
    flags: ErrorFlags,
    /// Pid of the spawned shell child, for pipe streams only.
    child: Option<libc::pid_t>,
}

impl Stream {
    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Open `path` in one of the six stdio modes (`"r"`, `"r+"`, `"w"`,
    /// `"w+"`, `"a"`, `"a+"`). Both buffers start empty.
    pub fn open(path: &str, mode: &str) -> Result<Stream> {
        let mode = OpenMode::parse(mode).ok_or(StreamError::InvalidMode)?;
        let fd = sys::sys_open(path, mode.to_oflags(), CREATE_MODE).map_err(StreamError::Open)?;
        Ok(Stream::from_fd(fd, None))
    }

    pub(crate) fn from_fd(fd: i32, child: Option<libc::pid_t>) -> Stream {
        Stream {
            fd,
            rbuf: ReadBuffer::new(),
            wbuf: WriteBuffer::new(),
            flags: ErrorFlags::default(),
            child,
        }
    }

    /// Flush pending writes, release the descriptor, and (for pipe streams)
    /// wait for the child.
    ///
    /// A failed drain is propagated as the close result and the descriptor
    /// is deliberately not released — only the stream's memory goes away.
    /// For pipe streams a descriptor-release failure is not surfaced; only
    /// a failure of the wait itself is.
    pub fn close(mut self) -> Result<()> {
        if !self.wbuf.is_empty() {
            let drained = self.drain();
            if let Err(e) = drained {
                self.fd = -1;
                self.child = None;
                return Err(StreamError::Write(e));
            }
        }
        let fd = self.fd;
        let child = self.child.take();
        self.fd = -1;
        match child {
            Some(pid) => {
                let _ = sys::sys_close(fd);
                sys::sys_waitpid(pid).map_err(StreamError::Wait)?;
            }
            None => sys::sys_close(fd).map_err(StreamError::Close)?,
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Refill / drain
    // -----------------------------------------------------------------------

    /// Load the read buffer with one raw read of up to `BUFSIZE` bytes.
    /// Only legal when the buffer is fully consumed. Returns the byte count
    /// (zero at end of stream). Zero or an error marks the read flag; a
    /// positive count clears it.
    fn refill(&mut self) -> std::result::Result<usize, Errno> {
        debug_assert!(self.rbuf.is_drained());
        match sys::sys_read(self.fd, self.rbuf.refill_target()) {
            Ok(0) => {
                self.flags.record_read(false);
                Ok(0)
            }
            Ok(n) => {
                self.rbuf.commit_refill(n);
                self.flags.record_read(true);
                Ok(n)
            }
            Err(e) => {
                self.flags.record_read(false);
                Err(e)
            }
        }
    }

    /// Write out every pending buffered byte, retrying short writes. The
    /// write offset resets whether or not the raw write succeeds; the
    /// outcome lands in the write flag.
    fn drain(&mut self) -> std::result::Result<(), Errno> {
        let res = sys::write_all(self.fd, self.wbuf.pending());
        self.wbuf.clear();
        self.flags.record_write(res.is_ok());
        res
    }

    // -----------------------------------------------------------------------
    // Byte I/O
    // -----------------------------------------------------------------------

    /// Next byte of the stream, refilling lazily. `None` signals end of
    /// stream or a read error — the two are deliberately not distinguished
    /// here; [`Stream::eof`] and [`Stream::has_error`] report the flags.
    pub fn get_byte(&mut self) -> Option<u8> {
        if self.rbuf.is_drained() {
            match self.refill() {
                Ok(n) if n > 0 => {}
                _ => return None,
            }
        }
        self.rbuf.take()
    }

    /// Buffer one byte, draining first if the buffer is full.
    pub fn put_byte(&mut self, byte: u8) -> Result<()> {
        if self.wbuf.is_full() {
            self.drain().map_err(StreamError::Write)?;
        }
        self.wbuf.push(byte);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Block I/O
    // -----------------------------------------------------------------------

    /// Read up to `count` elements of `elem_size` bytes into `dst`.
    ///
    /// Returns the number of elements whose bytes were fully transferred.
    /// Clean end of stream mid-element stops the transfer and returns the
    /// completed count; the partial element's bytes are consumed from the
    /// stream but not reported. A raw read error fails the whole call,
    /// discarding the completed count from the caller's view — a preserved
    /// convention, not an oversight.
    ///
    /// # Panics
    ///
    /// If `dst` is shorter than `elem_size * count`.
    pub fn read_elems(&mut self, dst: &mut [u8], elem_size: usize, count: usize) -> Result<usize> {
        assert!(dst.len() >= elem_size * count, "dst shorter than transfer");
        if elem_size == 0 {
            return Ok(0);
        }

        let mut pos = 0usize;
        let mut completed = 0usize;
        for _ in 0..count {
            let mut got = 0usize;
            while got < elem_size {
                if self.rbuf.is_drained() {
                    match self.refill() {
                        Ok(0) => return Ok(completed),
                        Ok(_) => {}
                        Err(e) => return Err(StreamError::Read(e)),
                    }
                }
                let n = self.rbuf.copy_into(&mut dst[pos..pos + (elem_size - got)]);
                got += n;
                pos += n;
            }
            completed += 1;
        }
        Ok(completed)
    }

    /// Write `count` elements of `elem_size` bytes from `src`, draining as
    /// the buffer fills. A drain failure fails the whole call (same
    /// preserved convention as [`Stream::read_elems`]); on success every
    /// element was buffered and `count` is returned.
    ///
    /// # Panics
    ///
    /// If `src` is shorter than `elem_size * count`.
    pub fn write_elems(&mut self, src: &[u8], elem_size: usize, count: usize) -> Result<usize> {
        assert!(src.len() >= elem_size * count, "src shorter than transfer");
        if elem_size == 0 {
            return Ok(0);
        }

        let mut pos = 0usize;
        let mut completed = 0usize;
        for _ in 0..count {
            let mut put = 0usize;
            while put < elem_size {
                if self.wbuf.is_full() {
                    self.drain().map_err(StreamError::Write)?;
                }
                let n = self.wbuf.copy_from(&src[pos..pos + (elem_size - put)]);
                put += n;
                pos += n;
            }
            completed += 1;
        }
        Ok(completed)
    }

    // -----------------------------------------------------------------------
    // Position
    // -----------------------------------------------------------------------

    /// Reposition the logical cursor. Pending writes are drained first and
    /// a drain failure fails the whole seek; a `Whence::Cur` offset is
    /// adjusted for unconsumed read-ahead; buffered read state is discarded
    /// before the raw seek, never reused across it.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        if !self.wbuf.is_empty() {
            self.drain().map_err(StreamError::Write)?;
        }
        let adjusted = cursor::adjust_seek_offset(offset, whence, self.rbuf.unread());
        self.rbuf.reset();
        sys::sys_lseek(self.fd, adjusted, whence.to_raw()).map_err(StreamError::Seek)?;
        Ok(())
    }

    /// The logical (caller-visible) position: the raw descriptor position,
    /// minus read-ahead not yet consumed, plus writes not yet flushed.
    pub fn tell(&mut self) -> Result<i64> {
        let raw =
            sys::sys_lseek(self.fd, 0, Whence::Cur.to_raw()).map_err(StreamError::Tell)?;
        Ok(cursor::logical_position(
            raw,
            self.rbuf.unread(),
            self.wbuf.len(),
        ))
    }

    /// Drain any pending buffered writes.
    pub fn flush(&mut self) -> Result<()> {
        if !self.wbuf.is_empty() {
            self.drain().map_err(StreamError::Write)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    /// End-of-stream indicator: set once a refill returns zero bytes (or
    /// fails), cleared by the next successful refill.
    pub fn eof(&self) -> bool {
        self.flags.read()
    }

    /// True if either direction's most recent refill/drain failed.
    pub fn has_error(&self) -> bool {
        self.flags.any()
    }

    /// Clear both sticky flags.
    pub fn clear_error(&mut self) {
        self.flags.clear();
    }

    /// The underlying descriptor.
    pub fn fd(&self) -> i32 {
        self.fd
    }
}

impl Drop for Stream {
    /// Best-effort release for streams leaked without an explicit
    /// [`Stream::close`]; a no-op after one. Failures have nowhere to go.
    fn drop(&mut self) {
        if self.fd < 0 {
            return;
        }
        if !self.wbuf.is_empty() {
            let _ = self.drain();
        }
        let _ = sys::sys_close(self.fd);
        self.fd = -1;
        if let Some(pid) = self.child.take() {
            let _ = sys::sys_waitpid(pid);
        }
    }
}
