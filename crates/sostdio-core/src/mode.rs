//! Open-mode and seek-origin handling.
//!
//! Parses the classic stdio mode strings ("r", "r+", "w", "w+", "a", "a+")
//! into flag sets and converts them to POSIX `O_*` bits, plus the pipe
//! direction ("r"/"w") and the `lseek` whence origins.

// ---------------------------------------------------------------------------
// Open mode
// ---------------------------------------------------------------------------

/// File open mode flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenMode {
    pub readable: bool,
    pub writable: bool,
    pub append: bool,
    pub truncate: bool,
    pub create: bool,
}

impl OpenMode {
    /// Parse a stdio mode string.
    ///
    /// Exactly six modes are accepted: `r`, `r+`, `w`, `w+`, `a`, `a+`.
    /// Returns `None` for anything else.
    pub fn parse(mode: &str) -> Option<OpenMode> {
        let m = match mode {
            "r" => OpenMode {
                readable: true,
                ..Default::default()
            },
            "r+" => OpenMode {
                readable: true,
                writable: true,
                create: true,
                ..Default::default()
            },
            "w" => OpenMode {
                writable: true,
                create: true,
                truncate: true,
                ..Default::default()
            },
            "w+" => OpenMode {
                readable: true,
                writable: true,
                create: true,
                truncate: true,
                ..Default::default()
            },
            "a" => OpenMode {
                writable: true,
                create: true,
                append: true,
                ..Default::default()
            },
            "a+" => OpenMode {
                readable: true,
                writable: true,
                create: true,
                append: true,
                ..Default::default()
            },
            _ => return None,
        };
        Some(m)
    }

    /// Convert to POSIX O_* flag bits.
    pub fn to_oflags(self) -> i32 {
        let mut oflags = 0i32;

        if self.readable && self.writable {
            oflags |= 2; // O_RDWR
        } else if self.writable {
            oflags |= 1; // O_WRONLY
        }
        // O_RDONLY is 0, so readable-only needs no flag.

        if self.create {
            oflags |= 0o100; // O_CREAT
        }
        if self.truncate {
            oflags |= 0o1000; // O_TRUNC
        }
        if self.append {
            oflags |= 0o2000; // O_APPEND
        }

        oflags
    }
}

// ---------------------------------------------------------------------------
// Pipe direction
// ---------------------------------------------------------------------------

/// Direction of a process-pipe stream, from the parent's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeDirection {
    /// Parent reads the child's standard output.
    Read,
    /// Parent writes the child's standard input.
    Write,
}

impl PipeDirection {
    /// Parse a popen-style direction string (`"r"` or `"w"`).
    pub fn parse(dir: &str) -> Option<PipeDirection> {
        match dir {
            "r" => Some(PipeDirection::Read),
            "w" => Some(PipeDirection::Write),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Seek origin
// ---------------------------------------------------------------------------

/// Seek origin, mirroring `SEEK_SET` / `SEEK_CUR` / `SEEK_END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// From the beginning of the file.
    Set,
    /// From the current position.
    Cur,
    /// From the end of the file.
    End,
}

impl Whence {
    /// The raw `lseek` whence value.
    pub fn to_raw(self) -> i32 {
        match self {
            Whence::Set => 0,
            Whence::Cur => 1,
            Whence::End => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
