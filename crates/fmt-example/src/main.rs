//! sfmt - worked example for standout-fmt.
//!
//! `sfmt demo` prints the reference walkthrough: regular substitution, a
//! missing argument, surplus arguments, a custom type and a bounded buffer.
//!
//! `sfmt render <TEMPLATE> [VALUES]...` renders a template from the command
//! line. Each value is typed by what it parses as: integer, then float,
//! then bool, falling back to a string.
//!
//! Run with: cargo run --bin sfmt -- demo

use std::any::Any;
use std::f64::consts::FRAC_PI_4;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use standout_fmt::rule::render_args;
use standout_fmt::{FmtConfig, Printer, Registry};
use tracing::Level;

/// Positional formatting with inline diagnostics
#[derive(Parser)]
#[command(name = "sfmt")]
#[command(version)]
#[command(about = "Render %-templates with typed values")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML or JSON file overriding the placeholder and diagnostic tokens
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the reference walkthrough
    Demo,
    /// Render a template with values given on the command line
    Render {
        /// Template; each `%` is replaced by the next value
        template: String,

        /// Values to substitute, in order
        values: Vec<String>,

        /// Render into a buffer of this many bytes instead of streaming
        #[arg(short, long)]
        bounded: Option<usize>,

        /// Interpret `\n` and `\t` escapes in the template
        #[arg(short, long)]
        escapes: bool,
    },
}

#[derive(Debug, Clone, Copy)]
struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

fn vec3_rule(value: &dyn Any, buf: &mut [u8]) -> usize {
    match value.downcast_ref::<Vec3>() {
        Some(v) => render_args(format_args!("{{{}, {}, {}}}", v.x, v.y, v.z), buf),
        None => 0,
    }
}

/// A command-line value, typed by what it parses as.
enum CliValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl CliValue {
    fn parse(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            CliValue::Int(n)
        } else if let Ok(f) = raw.parse::<f64>() {
            CliValue::Float(f)
        } else if let Ok(b) = raw.parse::<bool>() {
            CliValue::Bool(b)
        } else {
            CliValue::Text(raw.to_string())
        }
    }

    fn as_any(&self) -> &dyn Any {
        match self {
            CliValue::Int(n) => n,
            CliValue::Float(f) => f,
            CliValue::Bool(b) => b,
            CliValue::Text(s) => s,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<FmtConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => FmtConfig::from_json_str(&source),
        _ => FmtConfig::from_yaml_str(&source),
    }
    .with_context(|| format!("loading config {}", path.display()))?;
    Ok(config)
}

fn unescape(template: &str) -> String {
    template.replace("\\n", "\n").replace("\\t", "\t")
}

fn run_demo(printer: &Printer, out: &mut dyn Write) -> Result<()> {
    let v = Vec3 {
        x: 1.0,
        y: 2.5,
        z: 3.0,
    };
    let p = 0xbeefbabe_usize as *const ();
    let sin = FRAC_PI_4.sin();

    printer.fprint(out, "%; %; %; %; %\n", &[&(1 + 2), &"Hello world", &p, &v, &sin])?;
    printer.fprint(out, "% + % = %\n", &[&1, &2])?;
    printer.fprint(out, "hi", &[&(1 + 2), &"Hello world", &p, &v, &sin])?;
    writeln!(out, "\n")?;

    let mut buf = [0u8; 16];
    let n = printer.snprint(&mut buf, "hi", &[&(1 + 2), &"Hello world", &p, &v, &sin]);
    out.write_all(&buf[..n])?;
    writeln!(out)?;
    Ok(())
}

fn run_render(
    printer: &Printer,
    out: &mut dyn Write,
    template: &str,
    values: &[String],
    bounded: Option<usize>,
) -> Result<()> {
    let parsed: Vec<CliValue> = values.iter().map(|v| CliValue::parse(v)).collect();
    let args: Vec<&dyn Any> = parsed.iter().map(CliValue::as_any).collect();

    match bounded {
        Some(capacity) => {
            let mut buf = vec![0u8; capacity];
            let n = printer.snprint(&mut buf, template, &args);
            out.write_all(&buf[..n])?;
        }
        None => printer.fprint(out, template, &args)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FmtConfig::default(),
    };
    let mut registry = Registry::with_defaults();
    registry.register::<Vec3>("Vec3", vec3_rule);
    let printer = Printer::new().with_config(config).with_registry(registry);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.command {
        Command::Demo => run_demo(&printer, &mut handle),
        Command::Render {
            template,
            values,
            bounded,
            escapes,
        } => {
            let template = if escapes { unescape(&template) } else { template };
            run_render(&printer, &mut handle, &template, &values, bounded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_printer() -> Printer {
        let mut registry = Registry::with_defaults();
        registry.register::<Vec3>("Vec3", vec3_rule);
        Printer::new().with_registry(registry)
    }

    #[test]
    fn test_cli_value_typing() {
        assert!(matches!(CliValue::parse("42"), CliValue::Int(42)));
        assert!(matches!(CliValue::parse("2.5"), CliValue::Float(_)));
        assert!(matches!(CliValue::parse("true"), CliValue::Bool(true)));
        assert!(matches!(CliValue::parse("ok"), CliValue::Text(_)));
    }

    #[test]
    fn test_render_labels_follow_parsed_type() {
        let printer = demo_printer();
        let mut out: Vec<u8> = Vec::new();
        let values = vec!["7".to_string(), "1.5".to_string(), "ok".to_string()];
        run_render(&printer, &mut out, "", &values, None).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "%!(EXTRA int64=7, double=1.5, string=ok)"
        );
    }

    #[test]
    fn test_render_bounded() {
        let printer = demo_printer();
        let mut out: Vec<u8> = Vec::new();
        run_render(&printer, &mut out, "value: %", &["12345".to_string()], Some(8)).unwrap();
        assert_eq!(out, b"value: ");
    }

    #[test]
    fn test_demo_output() {
        let printer = demo_printer();
        let mut out: Vec<u8> = Vec::new();
        run_demo(&printer, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "3; Hello world; 0xbeefbabe; {1, 2.5, 3}; 0.7071067811865475");
        assert_eq!(lines[1], "1 + 2 = %!MISSING");
        assert_eq!(
            lines[2],
            "hi%!(EXTRA int=3, string=Hello world, pointer=0xbeefbabe, Vec3={1, 2.5, 3}, double=0.7071067811865475)"
        );
        assert_eq!(lines.last(), Some(&"hi%!(EXTRA int="));
    }

    #[test]
    fn test_load_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fmt.yaml");
        std::fs::write(&path, "placeholder: '@'\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.placeholder, '@');
    }

    #[test]
    fn test_load_json_config_rejects_empty_marker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fmt.json");
        std::fs::write(&path, r#"{"extra_open": ""}"#).unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a\\nb\\tc"), "a\nb\tc");
    }
}
