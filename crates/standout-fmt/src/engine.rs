//! The substitution engine.
//!
//! One left-to-right pass over the template. Literal text is copied through
//! unchanged; each placeholder consumes the head of the [`RenderQueue`], or
//! emits the missing-argument token when the queue is already empty. Records
//! still queued once the template ends are listed, in order, in a single
//! surplus block appended after everything else:
//!
//! ```text
//! "% + % = %\n", [1, 2]   ->  "1 + 2 = %!MISSING\n"
//! "hi",          [3, "ok"] ->  "hi%!(EXTRA int=3, string=ok)"
//! ```
//!
//! Count mismatches are part of the output, never errors.

use crate::config::FmtConfig;
use crate::queue::RenderQueue;
use crate::sink::Sink;

/// Counts collected while substituting a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Substitution {
    /// Placeholders found in the template.
    pub placeholders: usize,
    /// Placeholders that had no argument left.
    pub missing: usize,
    /// Arguments left over after the template ended.
    pub extra: usize,
}

impl Substitution {
    /// Returns true if placeholders and arguments matched one to one.
    pub fn is_exact(&self) -> bool {
        self.missing == 0 && self.extra == 0
    }
}

/// Substitutes queued records into templates according to a [`FmtConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Engine<'c> {
    config: &'c FmtConfig,
}

impl<'c> Engine<'c> {
    /// Creates an engine using `config`'s placeholder and tokens.
    pub fn new(config: &'c FmtConfig) -> Self {
        Self { config }
    }

    /// Writes `template` to `sink`, consuming `queue` completely.
    ///
    /// Every record is either substituted or listed in the surplus block;
    /// none survive the call.
    pub fn substitute(
        &self,
        template: &str,
        mut queue: RenderQueue,
        sink: &mut Sink<'_>,
    ) -> Substitution {
        let mut stats = Substitution::default();
        let mut literals = template.split(self.config.placeholder);

        if let Some(head) = literals.next() {
            sink.write_str(head);
        }
        for literal in literals {
            stats.placeholders += 1;
            match queue.pop() {
                Some(record) => sink.write_str(record.text()),
                None => {
                    stats.missing += 1;
                    sink.write_str(&self.config.missing);
                }
            }
            sink.write_str(literal);
        }

        if stats.missing > 0 {
            tracing::debug!(
                placeholders = stats.placeholders,
                missing = stats.missing,
                "template has more placeholders than arguments"
            );
        }

        if !queue.is_empty() {
            stats.extra = queue.len();
            tracing::debug!(
                placeholders = stats.placeholders,
                extra = stats.extra,
                "template has fewer placeholders than arguments"
            );
            self.write_extra(queue, sink);
        }

        stats
    }

    fn write_extra(&self, queue: RenderQueue, sink: &mut Sink<'_>) {
        sink.write_str(&self.config.extra_open);
        for (i, record) in queue.enumerate() {
            if i > 0 {
                sink.write_str(&self.config.extra_joiner);
            }
            sink.write_str(record.label());
            sink.write_str(&self.config.label_separator);
            sink.write_str(record.text());
        }
        sink.write_str(&self.config.extra_close);
    }
}
