//! Formatting rules: the two-phase measure/render contract.
//!
//! A [`Rule`] turns one value into text under the same discipline as C's
//! `snprintf`: it may be called with an empty buffer to learn how long the
//! text would be, and with a non-empty buffer to write at most
//! `buf.len() - 1` bytes followed by a terminating zero. Both calls return
//! the *untruncated* length, so the caller can size storage exactly.
//!
//! ```rust
//! use standout_fmt::rule::{render_display, Rule};
//! use std::any::Any;
//!
//! let rule = |value: &dyn Any, buf: &mut [u8]| match value.downcast_ref::<i32>() {
//!     Some(n) => render_display(n, buf),
//!     None => 0,
//! };
//!
//! assert_eq!(rule.measure(&1234i32), 4);
//!
//! let mut buf = [0xffu8; 3];
//! assert_eq!(rule.render(&1234i32, &mut buf), 4);
//! assert_eq!(&buf, b"12\0");
//! ```

use std::any::Any;
use std::fmt::{self, Display, Write};

/// Text produced for values no rule was registered for.
pub const UNKNOWN_TEXT: &str = "%!UNKNOWN";

/// Label reported for values no rule was registered for.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A formatting rule for one kind of value.
///
/// Implementations must never write outside `buf`, must zero-terminate
/// within `buf` whenever it is non-empty, and must report the same length
/// for the same value on every call.
pub trait Rule: Send + Sync {
    /// Renders `value` into `buf`, returning the untruncated length.
    fn render(&self, value: &dyn Any, buf: &mut [u8]) -> usize;

    /// Returns the length `value` would render to, without writing anything.
    fn measure(&self, value: &dyn Any) -> usize {
        self.render(value, &mut [])
    }
}

impl<F> Rule for F
where
    F: Fn(&dyn Any, &mut [u8]) -> usize + Send + Sync,
{
    fn render(&self, value: &dyn Any, buf: &mut [u8]) -> usize {
        self(value, buf)
    }
}

/// Fallback rule used when a value's type cannot be resolved.
///
/// Always renders [`UNKNOWN_TEXT`], whatever the value is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnknownRule;

impl Rule for UnknownRule {
    fn render(&self, _value: &dyn Any, buf: &mut [u8]) -> usize {
        render_str(UNKNOWN_TEXT, buf)
    }
}

/// Copies `text` into `buf` under the snprintf contract.
pub fn render_str(text: &str, buf: &mut [u8]) -> usize {
    let bytes = text.as_bytes();
    if let Some(room) = buf.len().checked_sub(1) {
        let n = room.min(bytes.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        buf[n] = 0;
    }
    bytes.len()
}

/// Formats any [`Display`] value into `buf` under the snprintf contract.
///
/// The value is formatted once; bytes beyond the buffer are counted but
/// dropped, so no intermediate allocation is needed.
pub fn render_display<T: Display + ?Sized>(value: &T, buf: &mut [u8]) -> usize {
    render_args(format_args!("{}", value), buf)
}

/// Formats pre-built [`fmt::Arguments`] into `buf` under the snprintf contract.
pub fn render_args(args: fmt::Arguments<'_>, buf: &mut [u8]) -> usize {
    let mut writer = BoundedWriter::new(buf);
    // BoundedWriter never reports an error; a Display impl that does is
    // treated as having produced what it wrote so far.
    let _ = writer.write_fmt(args);
    writer.finish()
}

/// `fmt::Write` adapter that fills a byte buffer and counts the overflow.
struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
    total: usize,
}

impl<'a> BoundedWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            written: 0,
            total: 0,
        }
    }

    fn room(&self) -> usize {
        self.buf.len().saturating_sub(1).saturating_sub(self.written)
    }

    fn finish(self) -> usize {
        if !self.buf.is_empty() {
            self.buf[self.written] = 0;
        }
        self.total
    }
}

impl Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let n = self.room().min(s.len());
        self.buf[self.written..self.written + n].copy_from_slice(&s.as_bytes()[..n]);
        self.written += n;
        self.total += s.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_str_measure_only() {
        assert_eq!(render_str("hello", &mut []), 5);
    }

    #[test]
    fn test_render_str_exact_fit() {
        let mut buf = [0xffu8; 6];
        assert_eq!(render_str("hello", &mut buf), 5);
        assert_eq!(&buf, b"hello\0");
    }

    #[test]
    fn test_render_str_truncates() {
        let mut buf = [0xffu8; 3];
        assert_eq!(render_str("hello", &mut buf), 5);
        assert_eq!(&buf, b"he\0");
    }

    #[test]
    fn test_render_str_single_byte_buffer() {
        let mut buf = [0xffu8; 1];
        assert_eq!(render_str("hello", &mut buf), 5);
        assert_eq!(buf, [0]);
    }

    #[test]
    fn test_render_display_counts_past_capacity() {
        let mut buf = [0xffu8; 4];
        assert_eq!(render_display(&-12345i64, &mut buf), 6);
        assert_eq!(&buf, b"-12\0");
    }

    #[test]
    fn test_render_display_leaves_tail_untouched() {
        let mut buf = [0xffu8; 8];
        assert_eq!(render_display(&7u8, &mut buf), 1);
        assert_eq!(&buf[..2], b"7\0");
        assert!(buf[2..].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn test_render_args_multiple_pieces() {
        let mut buf = [0u8; 32];
        let n = render_args(format_args!("{{{}, {}}}", 1, 2.5), &mut buf);
        assert_eq!(n, 8);
        assert_eq!(&buf[..n], b"{1, 2.5}");
    }

    #[test]
    fn test_unknown_rule_ignores_value() {
        assert_eq!(UnknownRule.measure(&()), UNKNOWN_TEXT.len());
        let mut buf = [0u8; 16];
        let n = UnknownRule.render(&"anything", &mut buf);
        assert_eq!(&buf[..n], UNKNOWN_TEXT.as_bytes());
    }

    #[test]
    fn test_closure_is_a_rule() {
        let rule = |_: &dyn Any, buf: &mut [u8]| render_str("x", buf);
        assert_eq!(rule.measure(&0u8), 1);
    }
}
