//! The render queue: one rendered record per argument, in argument order.
//!
//! Every argument is rendered up front, before the template is scanned, using
//! the two-phase rule contract: measure, allocate exactly, render. The
//! resulting [`Record`]s are owned by the [`RenderQueue`] until the
//! substitution engine pops them.

use std::collections::VecDeque;

use crate::registry::Resolved;

/// A rendered argument: its type label and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    label: String,
    text: String,
}

impl Record {
    /// Creates a record from an already rendered label and text.
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Renders a resolved value into a record.
    ///
    /// The rule is called twice: once with no capacity to learn the length,
    /// then with exactly `len + 1` bytes. A rule that reports a different
    /// length the second time keeps whatever it actually wrote.
    pub fn render(resolved: &Resolved<'_>) -> Self {
        let len = resolved.measure();
        let Some(capacity) = len.checked_add(1) else {
            tracing::warn!(
                label = resolved.label(),
                measured = len,
                "formatting rule reported an unrepresentable length"
            );
            return Self::new(resolved.label(), "");
        };
        let mut buf = vec![0u8; capacity];
        let reported = resolved.render(&mut buf);
        if reported != len {
            tracing::warn!(
                label = resolved.label(),
                measured = len,
                reported,
                "formatting rule reported inconsistent lengths"
            );
        }
        buf.truncate(len.min(reported));

        let text = match String::from_utf8(buf) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        Self::new(resolved.label(), text)
    }

    /// The diagnostic label of the value's type.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The rendered text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// FIFO of rendered records; order always equals argument order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderQueue {
    records: VecDeque<Record>,
}

impl RenderQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders every resolved argument, in order, into a new queue.
    pub fn from_resolved<'a, I>(args: I) -> Self
    where
        I: IntoIterator<Item = Resolved<'a>>,
    {
        let mut queue = Self::new();
        for resolved in args {
            queue.push(Record::render(&resolved));
        }
        queue
    }

    /// Appends a record at the tail.
    pub fn push(&mut self, record: Record) {
        tracing::trace!(label = record.label(), len = record.text().len(), "queued record");
        self.records.push_back(record);
    }

    /// Removes and returns the head record.
    pub fn pop(&mut self) -> Option<Record> {
        self.records.pop_front()
    }

    /// Number of records not yet consumed.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true once every record has been consumed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Iterator for RenderQueue {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for RenderQueue {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::rule::render_str;
    use std::any::Any;

    #[test]
    fn test_record_render_two_phase() {
        let registry = Registry::with_defaults();
        let record = Record::render(&registry.resolve(&3i32));
        assert_eq!(record.label(), "int");
        assert_eq!(record.text(), "3");
    }

    #[test]
    fn test_record_render_empty_text() {
        let registry = Registry::with_defaults();
        let record = Record::render(&registry.resolve(&""));
        assert_eq!(record.label(), "string");
        assert_eq!(record.text(), "");
    }

    #[test]
    fn test_record_render_inconsistent_rule() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = AtomicUsize::new(0);
        let rule = move |_: &dyn Any, buf: &mut [u8]| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                render_str("long text", buf)
            } else {
                render_str("short", buf)
            }
        };
        let record = Record::render(&Resolved::new(&(), &rule, "flaky"));
        assert_eq!(record.text(), "short");
    }

    #[test]
    fn test_record_render_overflowing_length() {
        let rule = |_: &dyn Any, _: &mut [u8]| usize::MAX;
        let record = Record::render(&Resolved::new(&(), &rule, "broken"));
        assert_eq!(record.label(), "broken");
        assert_eq!(record.text(), "");
    }

    #[test]
    fn test_queue_preserves_argument_order() {
        let registry = Registry::with_defaults();
        let args: [&dyn Any; 3] = [&1i32, &"two", &3.5f64];
        let mut queue = RenderQueue::from_resolved(args.iter().map(|a| registry.resolve(*a)));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(Record::new("int", "1")));
        assert_eq!(queue.pop(), Some(Record::new("string", "two")));
        assert_eq!(queue.pop(), Some(Record::new("double", "3.5")));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_drains_as_iterator() {
        let mut queue = RenderQueue::new();
        queue.push(Record::new("a", "1"));
        queue.push(Record::new("b", "2"));
        let labels: Vec<String> = queue.by_ref().map(|r| r.label().to_string()).collect();
        assert_eq!(labels, ["a", "b"]);
        assert!(queue.is_empty());
    }
}
