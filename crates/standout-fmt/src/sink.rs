//! Output targets for a rendering session.
//!
//! A [`Sink`] is either an unbounded [`StreamSink`] that forwards every byte
//! to an [`io::Write`], or a [`BoundedSink`] over a caller-owned byte region
//! that silently truncates and always leaves a terminating zero at its last
//! offset.
//!
//! # Bounded Layout
//!
//! For a region of capacity `c >= 1`, content occupies at most offsets
//! `0..c-1`; offset `c - 1` is reserved for the terminator and is only ever
//! written by [`Sink::finish`]. A zero-capacity region is never touched.
//!
//! ```rust
//! use standout_fmt::Sink;
//!
//! let mut buf = [0xffu8; 5];
//! let mut sink = Sink::bounded(&mut buf);
//! sink.write(b"hi%!(EXTRA ");
//! assert_eq!(sink.finish().unwrap(), 4);
//! assert_eq!(&buf, b"hi%!\0");
//! ```

use std::io::{self, Write};

/// Unbounded, write-through output.
///
/// The first I/O error is kept and every later write is skipped, so a
/// session always runs to completion and reports the error at the end.
pub struct StreamSink<'a> {
    dest: &'a mut dyn Write,
    limit: Option<usize>,
    written: usize,
    truncated: bool,
    error: Option<io::Error>,
}

impl<'a> StreamSink<'a> {
    /// Wraps `dest`; `limit` caps the total bytes forwarded, if set.
    pub fn new(dest: &'a mut dyn Write, limit: Option<usize>) -> Self {
        Self {
            dest,
            limit,
            written: 0,
            truncated: false,
            error: None,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        let n = match self.limit {
            Some(limit) => bytes.len().min(limit.saturating_sub(self.written)),
            None => bytes.len(),
        };
        if n < bytes.len() && !self.truncated {
            self.truncated = true;
            tracing::debug!(written = self.written + n, "stream output limit reached");
        }
        if n == 0 {
            return;
        }
        match self.dest.write_all(&bytes[..n]) {
            Ok(()) => self.written += n,
            Err(err) => self.error = Some(err),
        }
    }

    fn finish(self) -> io::Result<usize> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.dest.flush()?;
        Ok(self.written)
    }
}

/// Fixed-capacity output over a caller-owned byte region.
pub struct BoundedSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
    truncated: bool,
}

impl<'a> BoundedSink<'a> {
    /// Wraps `buf`; its length is the capacity, terminator included.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            truncated: false,
        }
    }

    /// Offset reserved for the terminator, or `None` for an empty region.
    fn end(&self) -> Option<usize> {
        self.buf.len().checked_sub(1)
    }

    fn write(&mut self, bytes: &[u8]) {
        let Some(end) = self.end() else {
            return;
        };
        let n = (end - self.pos).min(bytes.len());
        self.buf[self.pos..self.pos + n].copy_from_slice(&bytes[..n]);
        self.pos += n;
        if n < bytes.len() && !self.truncated {
            self.truncated = true;
            tracing::debug!(capacity = self.buf.len(), "bounded output truncated");
        }
    }

    fn finish(self) -> usize {
        if let Some(end) = self.end() {
            self.buf[self.pos] = 0;
            self.buf[end] = 0;
        }
        self.pos
    }
}

/// Where a session's output goes.
pub enum Sink<'a> {
    /// Unbounded destination; every write is appended in full.
    Stream(StreamSink<'a>),
    /// Fixed-capacity region; writes past capacity are dropped.
    Bounded(BoundedSink<'a>),
}

impl<'a> Sink<'a> {
    /// An unbounded sink over `dest`.
    pub fn stream(dest: &'a mut dyn Write) -> Self {
        Sink::Stream(StreamSink::new(dest, None))
    }

    /// A stream sink that forwards at most `limit` bytes.
    pub fn stream_limited(dest: &'a mut dyn Write, limit: usize) -> Self {
        Sink::Stream(StreamSink::new(dest, Some(limit)))
    }

    /// A bounded sink over `buf`.
    pub fn bounded(buf: &'a mut [u8]) -> Self {
        Sink::Bounded(BoundedSink::new(buf))
    }

    /// Writes `bytes`, truncating silently if the sink is bounded.
    pub fn write(&mut self, bytes: &[u8]) {
        match self {
            Sink::Stream(sink) => sink.write(bytes),
            Sink::Bounded(sink) => sink.write(bytes),
        }
    }

    /// Writes a string; shorthand for `write(text.as_bytes())`.
    pub fn write_str(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    /// Ends the session's output and returns the number of content bytes
    /// written.
    ///
    /// A bounded sink writes its terminator here: right after the content
    /// and at the last offset of the region. A stream sink is flushed and
    /// reports the first error any write hit.
    pub fn finish(self) -> io::Result<usize> {
        match self {
            Sink::Stream(sink) => sink.finish(),
            Sink::Bounded(sink) => Ok(sink.finish()),
        }
    }
}

impl std::fmt::Debug for Sink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::Stream(sink) => f
                .debug_struct("Stream")
                .field("limit", &sink.limit)
                .field("written", &sink.written)
                .finish_non_exhaustive(),
            Sink::Bounded(sink) => f
                .debug_struct("Bounded")
                .field("capacity", &sink.buf.len())
                .field("pos", &sink.pos)
                .finish(),
        }
    }
}
