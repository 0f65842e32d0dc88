//! Variadic front ends for the entry points.
//!
//! Each macro borrows its value arguments as `&dyn Any` and forwards to the
//! function of the same name.

/// Renders a template to standard output.
///
/// Evaluates to `std::io::Result<()>`.
///
/// ```rust,no_run
/// standout_fmt::print!("%; %\n", 1 + 2, "Hello world").unwrap();
/// ```
#[macro_export]
macro_rules! print {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::print($template, &[$(&$arg as &dyn ::std::any::Any),*])
    };
}

/// Renders a template to any `std::io::Write`.
///
/// Evaluates to `std::io::Result<()>`.
///
/// ```rust
/// let mut out: Vec<u8> = Vec::new();
/// standout_fmt::fprint!(&mut out, "% + %", 1, 2).unwrap();
/// assert_eq!(out, b"1 + 2");
/// ```
#[macro_export]
macro_rules! fprint {
    ($dest:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::fprint($dest, $template, &[$(&$arg as &dyn ::std::any::Any),*])
    };
}

/// Renders a template into a byte buffer, truncating and zero-terminating.
///
/// Evaluates to the number of content bytes written.
///
/// ```rust
/// let mut buf = [0u8; 8];
/// let n = standout_fmt::snprint!(&mut buf, "n=%", 42);
/// assert_eq!(&buf[..n], b"n=42");
/// ```
#[macro_export]
macro_rules! snprint {
    ($buf:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::snprint($buf, $template, &[$(&$arg as &dyn ::std::any::Any),*])
    };
}

/// Renders a template into a new `String`.
///
/// ```rust
/// assert_eq!(standout_fmt::sprint!("[%]", 'x'), "[x]");
/// ```
#[macro_export]
macro_rules! sprint {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::sprint($template, &[$(&$arg as &dyn ::std::any::Any),*])
    };
}
