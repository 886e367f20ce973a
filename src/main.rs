//! Terminal front end for the srcview engine
//!
//! Usage:
//!   srcview <file> [--line N] [--break N[,N...]] [--config DIR] [--find TEXT]
//!
//! Prints the file with a gutter of line numbers and breakpoint markers,
//! coloured with 24-bit ANSI escapes from the configured theme.

use anyhow::{Context, Result};
use srcview_config::ViewerConfig;
use srcview_core::{DocumentEngine, FontMetrics, GutterLine, Marker, StyledSegment};
use srcview_document::SourceText;
use srcview_syntax::{TextStyle, tokenizer_for_path};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

const USAGE: &str =
    "Usage: srcview <file> [--line N] [--break N[,N...]] [--config DIR] [--find TEXT]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    file: PathBuf,
    line: Option<usize>,
    breakpoints: Vec<usize>,
    config_root: Option<PathBuf>,
    find: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut file = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {flag}"))
        };
        match arg.as_str() {
            "--line" => options.line = Some(parse_line(&value("--line")?)?),
            "--break" => {
                for part in value("--break")?.split(',').filter(|part| !part.is_empty()) {
                    options.breakpoints.push(parse_line(part)?);
                }
            }
            "--config" => options.config_root = Some(PathBuf::from(value("--config")?)),
            "--find" => options.find = Some(value("--find")?),
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("Unknown option {flag}")),
            path => {
                if file.is_some() {
                    return Err(format!("Unexpected argument {path}"));
                }
                file = Some(PathBuf::from(path));
            }
        }
    }

    options.file = file.ok_or_else(|| USAGE.to_string())?;
    Ok(options)
}

fn parse_line(value: &str) -> Result<usize, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid line number {value:?}"))
}

fn run(options: Options) -> Result<()> {
    let root = match options.config_root {
        Some(root) => root,
        None => std::env::current_dir().context("resolve working directory")?,
    };
    let config = ViewerConfig::load_or_default(&root)
        .with_context(|| format!("load configuration from {}", root.display()))?;
    let styles = config
        .style_table(&root)
        .context("load theme")?;

    let source = SourceText::from_path(&options.file)
        .with_context(|| format!("read {}", options.file.display()))?;

    let mut engine = DocumentEngine::new(tokenizer_for_path(source.path()), styles)
        .with_gutter_config(config.gutter);
    engine.load(source);
    engine.set_breakpoints(options.breakpoints);

    if let Some(needle) = &options.find {
        match engine.find(needle, 1) {
            Some(line) => {
                engine.move_to(line, false);
            }
            None => tracing::warn!("{:?} not found in {}", needle, options.file.display()),
        }
    }
    if let Some(line) = options.line {
        let used = engine.move_to(line, true);
        if used != line {
            tracing::info!("Line {} is out of range, showing line {}", line, used);
        }
    }

    let width = engine.gutter_width(FontMetrics::from(&config));
    tracing::debug!(
        "{}: {} lines, gutter {}px",
        engine.source().display_name(),
        engine.line_count(),
        width
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let tab = " ".repeat(config.tab_size as usize);
    for row in engine.gutter(0, engine.line_count() - 1) {
        write_row(&mut out, &row, &engine.styled_line(row.line), &tab)?;
    }
    out.flush()?;
    Ok(())
}

fn write_row(
    out: &mut impl Write,
    row: &GutterLine,
    segments: &[StyledSegment<'_>],
    tab: &str,
) -> io::Result<()> {
    let marker = match (row.marker, row.is_current) {
        (Marker::BreakpointCurrent, _) => "\x1b[1;31m◉\x1b[0m",
        (Marker::Breakpoint, _) => "\x1b[31m●\x1b[0m",
        (Marker::None, true) => "\x1b[1;33m▶\x1b[0m",
        (Marker::None, false) => " ",
    };
    write!(out, "{} {} | ", marker, row.label)?;

    for segment in segments {
        let text = segment.text.trim_end_matches('\r').replace('\t', tab);
        write!(out, "{}{}\x1b[0m", escape(&segment.style), text)?;
    }
    writeln!(out)
}

/// SGR escape selecting `style`.
fn escape(style: &TextStyle) -> String {
    let mut codes = Vec::new();
    if style.bold {
        codes.push("1".to_string());
    }
    if style.italic {
        codes.push("3".to_string());
    }
    if let Some(color) = style.foreground {
        codes.push(format!("38;2;{};{};{}", color.r, color.g, color.b));
    }
    if let Some(color) = style.background {
        codes.push(format!("48;2;{};{};{}", color.r, color.g, color.b));
    }

    if codes.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", codes.join(";"))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(options) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
