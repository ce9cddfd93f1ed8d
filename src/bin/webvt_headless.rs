//! WebVT Headless Runner
//!
//! Feeds a recorded byte stream (a file or stdin) through the terminal engine
//! and prints the resulting screen, either as plain text or as a JSON
//! snapshot. Useful for testing and for generating deterministic snapshots.
//!
//! # Usage
//!
//! ```bash
//! printf 'Hello\x1b[31mRed\x1b[0m' | webvt-headless --cols 40 --rows 5
//! webvt-headless session.bin --format json --chunk 7
//! ```

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use webvt::{Terminal, TerminalConfig};

/// Run the terminal engine without a display
#[derive(Parser, Debug)]
#[command(name = "webvt-headless")]
#[command(version)]
#[command(about = "Replay terminal output and print the resulting screen", long_about = None)]
struct Args {
    /// Input file (stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Terminal columns
    #[arg(long, value_name = "COLS")]
    cols: Option<usize>,

    /// Terminal rows
    #[arg(long, value_name = "ROWS")]
    rows: Option<usize>,

    /// Scrollback capacity
    #[arg(long, value_name = "LINES")]
    scrollback: Option<usize>,

    /// Feed the input in chunks of this many bytes
    #[arg(long, value_name = "BYTES")]
    chunk: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match TerminalConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
        None => TerminalConfig::default(),
    };
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(scrollback) = args.scrollback {
        config.scrollback_lines = scrollback;
    }

    let input = match &args.input {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
        None => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        }
    };

    let mut terminal = Terminal::new(config);
    let chunk = args.chunk.unwrap_or(input.len()).max(1);
    let mut replies = String::new();
    for piece in input.chunks(chunk) {
        replies.push_str(&terminal.feed(piece));
    }
    tracing::debug!(bytes = input.len(), chunk, "input processed");

    let snapshot = terminal.snapshot();
    match args.format {
        OutputFormat::Text => {
            println!("Terminal State ({}x{}):", snapshot.cols, snapshot.rows);
            println!("Cursor: ({}, {})", snapshot.cursor.col, snapshot.cursor.row);
            if !snapshot.title.is_empty() {
                println!("Title: {}", snapshot.title);
            }
            if !replies.is_empty() {
                println!("Replies: {}", replies.escape_debug());
            }
            println!("---");
            for line in &snapshot.lines {
                println!("{}", line.text);
            }
            println!("---");
        }
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
