//! Rendering sessions and the public entry points.
//!
//! A [`Session`] ties one template, one fully rendered [`RenderQueue`] and
//! one [`Sink`] together for a single call. Nothing is shared between
//! sessions, so independent threads can render concurrently without any
//! coordination.
//!
//! [`Printer`] bundles a [`FmtConfig`] with a [`Registry`] and offers the
//! four entry points; the free functions [`print`], [`fprint`], [`snprint`]
//! and [`sprint`] use a shared default printer.

use std::any::Any;
use std::io::{self, Write};

use once_cell::sync::Lazy;

use crate::config::FmtConfig;
use crate::engine::{Engine, Substitution};
use crate::queue::RenderQueue;
use crate::registry::Registry;
use crate::sink::Sink;

static DEFAULT_PRINTER: Lazy<Printer> = Lazy::new(Printer::new);

/// What a completed session wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Content bytes written, excluding any terminator.
    pub written: usize,
    /// Placeholder and argument counts.
    pub substitution: Substitution,
}

/// A single rendering operation.
#[derive(Debug)]
pub struct Session<'t, 's> {
    template: &'t str,
    queue: RenderQueue,
    sink: Sink<'s>,
}

impl<'t, 's> Session<'t, 's> {
    /// Creates a session; `queue` must already hold every rendered argument.
    pub fn new(template: &'t str, queue: RenderQueue, sink: Sink<'s>) -> Self {
        Self {
            template,
            queue,
            sink,
        }
    }

    /// Runs the session to completion.
    ///
    /// The template is always scanned fully and the queue always drained;
    /// the only error is one reported by a stream destination.
    pub fn run(self, config: &FmtConfig) -> io::Result<Outcome> {
        let Session {
            template,
            queue,
            mut sink,
        } = self;
        let substitution = Engine::new(config).substitute(template, queue, &mut sink);
        let written = sink.finish()?;
        Ok(Outcome {
            written,
            substitution,
        })
    }
}

/// A configured formatter: placeholder and diagnostic settings plus the
/// registry used to resolve argument types.
///
/// # Example
///
/// ```rust
/// use standout_fmt::{FmtConfig, Printer};
///
/// let printer = Printer::new().with_config(FmtConfig::new().with_placeholder('#'));
/// assert_eq!(printer.sprint("# of #", &[&1i32, &"two"]), "1 of two");
/// ```
#[derive(Debug, Clone)]
pub struct Printer {
    config: FmtConfig,
    registry: Registry,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    /// A printer with the default config and the built-in scalar rules.
    pub fn new() -> Self {
        Self {
            config: FmtConfig::default(),
            registry: Registry::with_defaults(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: FmtConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the registry.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &FmtConfig {
        &self.config
    }

    /// The registry used to resolve arguments.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the registry, for registering custom rules.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Renders every argument, in order, into a fresh queue.
    pub fn render_queue(&self, args: &[&dyn Any]) -> RenderQueue {
        RenderQueue::from_resolved(args.iter().map(|arg| self.registry.resolve(*arg)))
    }

    /// Renders to an arbitrary writer and reports what was written.
    pub fn render_to(
        &self,
        dest: &mut dyn Write,
        template: &str,
        args: &[&dyn Any],
    ) -> io::Result<Outcome> {
        let sink = match self.config.max_output {
            Some(limit) => Sink::stream_limited(dest, limit),
            None => Sink::stream(dest),
        };
        Session::new(template, self.render_queue(args), sink).run(&self.config)
    }

    /// Renders to standard output.
    pub fn print(&self, template: &str, args: &[&dyn Any]) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.fprint(&mut handle, template, args)
    }

    /// Renders to `dest`.
    pub fn fprint(
        &self,
        dest: &mut dyn Write,
        template: &str,
        args: &[&dyn Any],
    ) -> io::Result<()> {
        self.render_to(dest, template, args).map(|_| ())
    }

    /// Renders into `buf`, truncating to fit and zero-terminating.
    ///
    /// Returns the number of content bytes written. An empty `buf` is left
    /// untouched and no argument is rendered.
    pub fn snprint(&self, buf: &mut [u8], template: &str, args: &[&dyn Any]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        let session = Session::new(template, self.render_queue(args), Sink::bounded(buf));
        match session.run(&self.config) {
            Ok(outcome) => outcome.written,
            // Bounded sinks have no I/O to fail.
            Err(_) => 0,
        }
    }

    /// Renders into a new `String`.
    ///
    /// With [`FmtConfig::max_output`] set, a character cut by the limit is
    /// dropped whole, so the result never exceeds the limit.
    pub fn sprint(&self, template: &str, args: &[&dyn Any]) -> String {
        let mut out: Vec<u8> = Vec::with_capacity(template.len());
        // Writing into a Vec cannot fail.
        let _ = self.render_to(&mut out, template, args);
        match String::from_utf8(out) {
            Ok(text) => text,
            // Only a byte limit can leave invalid UTF-8, and only at the end.
            Err(err) => {
                let valid = err.utf8_error().valid_up_to();
                let mut bytes = err.into_bytes();
                bytes.truncate(valid);
                String::from_utf8(bytes).unwrap_or_default()
            }
        }
    }
}

/// Renders `template` with `args` to standard output.
pub fn print(template: &str, args: &[&dyn Any]) -> io::Result<()> {
    DEFAULT_PRINTER.print(template, args)
}

/// Renders `template` with `args` to `dest`.
pub fn fprint(dest: &mut dyn Write, template: &str, args: &[&dyn Any]) -> io::Result<()> {
    DEFAULT_PRINTER.fprint(dest, template, args)
}

/// Renders `template` with `args` into `buf`; see [`Printer::snprint`].
pub fn snprint(buf: &mut [u8], template: &str, args: &[&dyn Any]) -> usize {
    DEFAULT_PRINTER.snprint(buf, template, args)
}

/// Renders `template` with `args` into a new `String`.
pub fn sprint(template: &str, args: &[&dyn Any]) -> String {
    DEFAULT_PRINTER.sprint(template, args)
}
