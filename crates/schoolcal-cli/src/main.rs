//! `schoolcal` CLI — convert school calendar text extracts to iCalendar.
//!
//! Inputs are the tagged text produced by a PDF-to-HTML converter, one file per
//! calendar document. All documents are extracted with the same layout and
//! merged into one chronologically ordered calendar.
//!
//! ## Usage
//!
//! ```sh
//! # Block calendar (month grid with endnotes)
//! schoolcal --layout block -t "District Calendar" -o district.ics district.html
//!
//! # Chronological list, several documents, JSON to stdout
//! schoolcal --layout list --json -o - fall.html spring.html
//!
//! # Read stdin, override markers from a JSON config
//! cat list.html | schoolcal --layout list --config markers.json -
//! ```

mod ics;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use schoolcal_core::{extract, EventAssembler, ExtractConfig, Layout};
use std::io::{self, Read};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_TITLE: &str = "School Calendar";
const DEFAULT_OUTPUT: &str = "calendar.ics";

#[derive(Parser)]
#[command(
    name = "schoolcal",
    version,
    about = "Convert school calendar text extracts to a single iCalendar file"
)]
struct Cli {
    /// Layout of the input documents
    #[arg(short, long, value_enum)]
    layout: LayoutArg,

    /// Calendar title
    #[arg(short, long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Output file ("-" writes to stdout)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: String,

    /// JSON file overriding extraction markers and patterns
    #[arg(long)]
    config: Option<String>,

    /// Write the event list as JSON instead of iCalendar
    #[arg(long)]
    json: bool,

    /// Log extraction details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Tagged text documents ("-" reads stdin)
    #[arg(required = true)]
    inputs: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// Month blocks of date-range lines with endnotes
    Block,
    /// Dated anchors followed by bulleted sub-events
    List,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Block => Layout::Block,
            LayoutArg::List => Layout::List,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => {
            let json = read_input(path)?;
            ExtractConfig::from_json(&json)
                .with_context(|| format!("Failed to load config: {}", path))?
        }
        None => ExtractConfig::default(),
    };

    let layout = Layout::from(cli.layout);
    let mut assembler = EventAssembler::new();
    for input in &cli.inputs {
        let text = read_input(input)?;
        let events = extract(&text, layout, &config)
            .with_context(|| format!("Failed to extract events from {}", input))?;
        if events.is_empty() {
            warn!(input = %input, "no events found");
        }
        info!(input = %input, events = events.len(), "extracted");
        assembler.push(events);
    }
    let events = assembler.finish();

    let content = if cli.json {
        serde_json::to_string_pretty(&events).context("Failed to serialize events")?
    } else {
        ics::to_calendar(&cli.title, &events).to_string()
    };
    write_output(&cli.output, &content)?;

    eprintln!("Wrote {} events to {}", events.len(), cli.output);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

fn write_output(path: &str, content: &str) -> Result<()> {
    if path == "-" {
        print!("{}", content);
        return Ok(());
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path))
}
