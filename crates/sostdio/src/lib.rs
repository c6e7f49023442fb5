//! # sostdio
//!
//! A buffered file-stream layer over raw OS file descriptors: character,
//! block, and process-pipe I/O with a single fixed buffer capacity.
//!
//! [`Stream`] owns one read buffer, one write buffer, and one descriptor.
//! Refills and drains are lazy; `seek`/`tell` reconcile the raw descriptor
//! position with buffered-but-unconsumed and buffered-but-unflushed bytes so
//! the caller always sees the logical cursor. [`Stream::open_process`] runs
//! a shell command with one end of a pipe as its stdin or stdout and wraps
//! the other end in the same stream abstraction, reaping the child on close.
//!
//! The pure bookkeeping lives in `sostdio-core`; this crate adds the OS
//! boundary. `unsafe` is confined to the [`sys`] capability module.

#![deny(unsafe_code)]

pub mod error;
mod pipe;
pub mod stream;
#[allow(unsafe_code)]
pub mod sys;

pub use error::{Result, StreamError};
pub use sostdio_core::{BUFSIZE, OpenMode, PipeDirection, Whence};
pub use stream::Stream;
