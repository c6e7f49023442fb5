//! Raw OS capability layer.
//!
//! Typed `Result`-returning wrappers over the handful of `libc` calls the
//! stream engine consumes: open, read, write, lseek, close, pipe, shell
//! spawn, and waitpid. Nothing above this module inspects a raw return
//! value or touches `unsafe`.

use std::ffi::{CString, c_int};

use crate::error::Errno;

/// Standard input descriptor (the child-side substitution target for a
/// write-direction pipe stream).
pub const STDIN_FILENO: i32 = 0;
/// Standard output descriptor (the target for a read-direction stream).
pub const STDOUT_FILENO: i32 = 1;

/// Fetch the errno left behind by the last failed call.
fn last_errno() -> Errno {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// `open(2)` with the given `O_*` flags; `create_mode` applies when
/// `O_CREAT` is set.
pub fn sys_open(path: &str, oflags: i32, create_mode: u32) -> Result<i32, Errno> {
    let c_path = CString::new(path).map_err(|_| libc::EINVAL)?;
    // SAFETY: c_path is NUL-terminated and outlives the call.
    let fd = unsafe { libc::open(c_path.as_ptr(), oflags, create_mode as libc::c_uint) };
    if fd < 0 { Err(last_errno()) } else { Ok(fd) }
}

/// `read(2)` — a single raw read of up to `buf.len()` bytes. May be short;
/// zero means end of stream.
pub fn sys_read(fd: i32, buf: &mut [u8]) -> Result<usize, Errno> {
    // SAFETY: buf is a valid writable region of buf.len() bytes.
    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
    if n < 0 { Err(last_errno()) } else { Ok(n as usize) }
}

/// `write(2)` — a single raw write. May be short; the engine loops via
/// [`write_all`].
pub fn sys_write(fd: i32, buf: &[u8]) -> Result<usize, Errno> {
    // SAFETY: buf is a valid readable region of buf.len() bytes.
    let n = unsafe { libc::write(fd, buf.as_ptr().cast(), buf.len()) };
    if n < 0 { Err(last_errno()) } else { Ok(n as usize) }
}

/// Write the whole of `buf`, retrying short writes until every byte is out
/// or a hard error occurs. A zero-byte write of a nonzero request is a hard
/// error, never retried.
pub fn write_all(fd: i32, buf: &[u8]) -> Result<(), Errno> {
    let mut written = 0usize;
    while written < buf.len() {
        let n = sys_write(fd, &buf[written..])?;
        if n == 0 {
            return Err(last_errno());
        }
        written += n;
    }
    Ok(())
}

/// `lseek(2)`; returns the new raw position.
pub fn sys_lseek(fd: i32, offset: i64, whence: i32) -> Result<i64, Errno> {
    // SAFETY: plain fd/integer call, no pointers.
    let off = unsafe { libc::lseek(fd, offset as libc::off_t, whence) };
    if off < 0 { Err(last_errno()) } else { Ok(off) }
}

/// `close(2)`.
pub fn sys_close(fd: i32) -> Result<(), Errno> {
    // SAFETY: plain fd call.
    let rc = unsafe { libc::close(fd) };
    if rc < 0 { Err(last_errno()) } else { Ok(()) }
}

/// `pipe(2)`; returns `(read_end, write_end)`.
pub fn sys_pipe() -> Result<(i32, i32), Errno> {
    let mut fds = [0 as c_int; 2];
    // SAFETY: fds is a valid two-element int array.
    let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
    if rc != 0 {
        return Err(last_errno());
    }
    Ok((fds[0], fds[1]))
}

/// Fork and exec `/bin/sh -c command` in the child, with `child_end` dup2'd
/// onto descriptor `child_target` (stdin or stdout) and `parent_end` closed
/// child-side first. Returns the child's pid; the caller keeps both pipe
/// ends open in the parent and closes the unused one itself.
///
/// If the exec fails the child terminates with status 127.
pub fn spawn_shell(
    command: &str,
    child_end: i32,
    child_target: i32,
    parent_end: i32,
) -> Result<libc::pid_t, Errno> {
    let cmd = CString::new(command).map_err(|_| libc::EINVAL)?;

    // SAFETY: the child branch only calls async-signal-safe functions
    // (close, dup2, execv, _exit) before handing off to the shell.
    let pid = unsafe { libc::fork() };
    if pid < 0 {
        return Err(last_errno());
    }
    if pid == 0 {
        // SAFETY: child process; argv is NUL-terminated and null-capped.
        unsafe {
            libc::close(parent_end);
            libc::dup2(child_end, child_target);
            let argv = [
                c"sh".as_ptr(),
                c"-c".as_ptr(),
                cmd.as_ptr(),
                std::ptr::null(),
            ];
            libc::execv(c"/bin/sh".as_ptr(), argv.as_ptr());
            libc::_exit(127);
        }
    }
    Ok(pid)
}

/// `waitpid(2)` — block until the child terminates. Returns the raw wait
/// status (not surfaced by the stream layer).
pub fn sys_waitpid(pid: libc::pid_t) -> Result<i32, Errno> {
    let mut status: c_int = 0;
    // SAFETY: status is a valid int out-parameter.
    let rc = unsafe { libc::waitpid(pid, &mut status, 0) };
    if rc < 0 { Err(last_errno()) } else { Ok(status) }
}
