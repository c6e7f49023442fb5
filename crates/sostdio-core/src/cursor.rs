//! Seek/tell offset reconciliation.
//!
//! The raw descriptor position and the caller-visible position diverge in
//! two ways: a refill reads ahead of the caller (raw runs ahead by the
//! unconsumed read-ahead), and buffered writes lag behind the caller (the
//! OS has not yet seen the pending bytes). These helpers compute the
//! adjustments; the stream layer applies them around the raw calls.

use crate::mode::Whence;

/// Adjust a requested seek offset for unconsumed read-ahead.
///
/// Only a seek relative to the current position needs correcting: the raw
/// position is `unread` bytes past what the caller has consumed, so the
/// requested delta shrinks by that much. Absolute and end-relative seeks
/// pass through unchanged.
#[must_use]
pub const fn adjust_seek_offset(offset: i64, whence: Whence, unread: usize) -> i64 {
    match whence {
        Whence::Cur => offset - unread as i64,
        Whence::Set | Whence::End => offset,
    }
}

/// Compute the logical (caller-visible) position from the raw one.
///
/// Unconsumed read-ahead is discounted; buffered-but-unflushed write bytes
/// are added, since the caller's cursor is already past them even though
/// the OS has not seen them yet. At most one of the two terms is nonzero
/// in practice: a seek flushes writes before touching read state, so the
/// two are never reconciled against the same raw position.
#[must_use]
pub const fn logical_position(raw: i64, unread: usize, pending_write: usize) -> i64 {
    raw - unread as i64 + pending_write as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_seek_discounts_read_ahead() {
        // Caller consumed up to logical 10, refill ran raw ahead to 50.
        // A +5 relative seek must land at logical 15 = raw 15, so the raw
        // delta is 5 - 40 = -35.
        assert_eq!(adjust_seek_offset(5, Whence::Cur, 40), -35);
    }

    #[test]
    fn absolute_seek_unchanged() {
        assert_eq!(adjust_seek_offset(100, Whence::Set, 40), 100);
        assert_eq!(adjust_seek_offset(-10, Whence::End, 40), -10);
    }

    #[test]
    fn relative_seek_no_slack() {
        assert_eq!(adjust_seek_offset(7, Whence::Cur, 0), 7);
    }

    #[test]
    fn tell_discounts_read_ahead() {
        // Raw at 4096 after a full refill, caller consumed 3 bytes.
        assert_eq!(logical_position(4096, 4093, 0), 3);
    }

    #[test]
    fn tell_adds_pending_writes() {
        // Raw still at 0, 17 bytes buffered but unflushed.
        assert_eq!(logical_position(0, 0, 17), 17);
    }

    #[test]
    fn tell_raw_when_buffers_idle() {
        assert_eq!(logical_position(123, 0, 0), 123);
    }
}
