//! Stream error type.
//!
//! Every fallible operation returns a tagged failure instead of the classic
//! shared integer sentinels, so "zero elements transferred" and "error" can
//! never be confused. Each variant names the failing operation and carries
//! the OS errno where one exists.

use thiserror::Error;

/// OS error number, as reported by the capability layer.
pub type Errno = i32;

/// Failure of a stream operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    /// The open-mode or pipe-direction string was not recognized.
    #[error("invalid stream mode")]
    InvalidMode,

    /// The underlying open failed.
    #[error("open failed (errno {0})")]
    Open(Errno),

    /// A raw read (buffer refill) failed.
    #[error("read failed (errno {0})")]
    Read(Errno),

    /// A raw write (buffer drain) failed or moved zero bytes.
    #[error("write failed (errno {0})")]
    Write(Errno),

    /// The raw seek failed.
    #[error("seek failed (errno {0})")]
    Seek(Errno),

    /// The raw position query failed.
    #[error("tell failed (errno {0})")]
    Tell(Errno),

    /// Releasing the descriptor failed.
    #[error("close failed (errno {0})")]
    Close(Errno),

    /// Pipe creation failed.
    #[error("pipe failed (errno {0})")]
    Pipe(Errno),

    /// Spawning the shell child failed.
    #[error("spawn failed (errno {0})")]
    Spawn(Errno),

    /// Waiting for the child to terminate failed.
    #[error("wait failed (errno {0})")]
    Wait(Errno),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StreamError>;
