//! Type-generic positional formatting with inline diagnostics.
//!
//! `standout-fmt` renders a template containing `%` placeholders with an
//! ordered list of values of any type. Each value is rendered by the rule
//! registered for its type, then substituted into the template in order.
//! Count mismatches never fail: they show up in the output.
//!
//! # Quick Start
//!
//! ```rust
//! use standout_fmt::sprint;
//!
//! assert_eq!(sprint!("%; %\n", 3, "ok"), "3; ok\n");
//!
//! // Too few arguments: each unmatched placeholder is marked in place.
//! assert_eq!(sprint!("% + % = %\n", 1, 2), "1 + 2 = %!MISSING\n");
//!
//! // Too many: the surplus is listed once, after the template.
//! assert_eq!(sprint!("hi", 3, "ok"), "hi%!(EXTRA int=3, string=ok)");
//! ```
//!
//! # Output Targets
//!
//! | Entry point | Destination |
//! |-------------|-------------|
//! | [`print!`] / [`print`] | standard output |
//! | [`fprint!`] / [`fprint`] | any [`std::io::Write`] |
//! | [`snprint!`] / [`snprint`] | a fixed byte buffer, truncated and zero-terminated |
//! | [`sprint!`] / [`sprint`] | a new `String` |
//!
//! ```rust
//! use standout_fmt::snprint;
//!
//! let mut buf = [0u8; 5];
//! let written = snprint!(&mut buf, "hi", 3, "ok");
//! assert_eq!(written, 4);
//! assert_eq!(&buf, b"hi%!\0");
//! ```
//!
//! # Types and Rules
//!
//! Values are resolved at runtime through a [`Registry`]. The built-in
//! scalars (integers, floats, `bool`, `char`, strings and raw pointers) are
//! registered by default; other types can be added with
//! [`Registry::register`]. A value whose type has no rule renders as
//! `%!UNKNOWN` with the label `unknown`.
//!
//! Arguments are passed as `&dyn Any`, so they must be `'static` types:
//! string literals work directly, borrowed text is passed as a `String`.
//!
//! # Logging
//!
//! Diagnostics and truncation are reported through `tracing` at `debug`
//! level; nothing is logged unless the application installs a subscriber.

mod config;
mod engine;
mod error;
mod macros;
mod queue;
mod registry;
pub mod rule;
mod session;
mod sink;

pub use config::FmtConfig;
pub use engine::{Engine, Substitution};
pub use error::{ConfigError, Result};
pub use queue::{Record, RenderQueue};
pub use registry::{Registry, Resolved};
pub use rule::{Rule, UnknownRule};
pub use session::{fprint, print, snprint, sprint, Outcome, Printer, Session};
pub use sink::{BoundedSink, Sink, StreamSink};

/// Default tokens and placeholder.
pub mod tokens {
    pub use crate::config::{
        EXTRA_CLOSE, EXTRA_JOINER, EXTRA_OPEN, LABEL_SEPARATOR, MISSING, PLACEHOLDER,
    };
    pub use crate::rule::{UNKNOWN_LABEL, UNKNOWN_TEXT};
}
