//! Process-pipe stream construction.
//!
//! A pipe stream is an ordinary [`Stream`] whose descriptor is one end of a
//! pipe into a spawned `/bin/sh -c` child; the only behavioral divergence
//! is the wait step `Stream::close` performs when a child pid is present.

use sostdio_core::mode::PipeDirection;

use crate::error::{Result, StreamError};
use crate::stream::Stream;
use crate::sys;

impl Stream {
    /// Run `command` through the shell with one pipe end as its stdin
    /// (direction `"w"`: the stream writes to the child) or stdout
    /// (direction `"r"`: the stream reads the child's output), and wrap the
    /// parent's end as a stream.
    ///
    /// Any direction other than `"r"` or `"w"` fails with
    /// [`StreamError::InvalidMode`] before any resource is created. The
    /// unused pipe end is closed in the parent immediately after the spawn.
    pub fn open_process(command: &str, direction: &str) -> Result<Stream> {
        let direction = PipeDirection::parse(direction).ok_or(StreamError::InvalidMode)?;

        let (read_end, write_end) = sys::sys_pipe().map_err(StreamError::Pipe)?;
        let (parent_end, child_end, child_target) = match direction {
            PipeDirection::Read => (read_end, write_end, sys::STDOUT_FILENO),
            PipeDirection::Write => (write_end, read_end, sys::STDIN_FILENO),
        };

        match sys::spawn_shell(command, child_end, child_target, parent_end) {
            Ok(pid) => {
                let _ = sys::sys_close(child_end);
                Ok(Stream::from_fd(parent_end, Some(pid)))
            }
            Err(e) => {
                let _ = sys::sys_close(read_end);
                let _ = sys::sys_close(write_end);
                Err(StreamError::Spawn(e))
            }
        }
    }
}
