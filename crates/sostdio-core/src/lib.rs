//! # sostdio-core
//!
//! Pure, safe state machine for the sostdio buffered-stream layer.
//!
//! This crate holds everything that can be expressed without touching the
//! operating system: open-mode parsing, the fixed-capacity read/write buffer
//! records with their cursor invariants, the sticky per-direction error
//! flags, and the seek/tell offset-reconciliation arithmetic. The `sostdio`
//! crate drives these against real file descriptors. No `unsafe` code is
//! permitted at the crate level.

#![deny(unsafe_code)]

pub mod buffer;
pub mod cursor;
pub mod mode;

pub use buffer::{BUFSIZE, ErrorFlags, ReadBuffer, WriteBuffer};
pub use mode::{OpenMode, PipeDirection, Whence};
