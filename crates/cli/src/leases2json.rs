//! leases2json - Extract the Schedule of Notices of Leases from a register
//!
//! Reads the schedule table from the clipped region of each register page
//! and writes the lease entries as JSON.

mod pdfium_source;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use lease_schedule_core::high_level::{extract_schedule, save_schedule};
use lease_schedule_core::params::{ClipRect, ScheduleParams, TwoChunkPlacement};
use lease_schedule_core::source::{PageTextSource, TextPages};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::pdfium_source::PdfiumSource;

/// Format of the input document.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum InputFormat {
    /// Detect from the file header (default)
    #[default]
    Auto,
    /// Register PDF, read through PDFium
    Pdf,
    /// Pre-extracted text, pages separated by form feeds
    Text,
}

/// Placement of two-column lines.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum TwoChunk {
    /// Leading whitespace means description and term, otherwise reference and term
    #[default]
    LeadingGap,
    /// Fill the first two columns in order
    Sequential,
}

impl From<TwoChunk> for TwoChunkPlacement {
    fn from(value: TwoChunk) -> Self {
        match value {
            TwoChunk::LeadingGap => TwoChunkPlacement::LeadingGap,
            TwoChunk::Sequential => TwoChunkPlacement::Sequential,
        }
    }
}

/// Script to get the schedule of notices of lease from a register PDF.
#[derive(Parser, Debug)]
#[command(name = "leases2json")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Gets schedule of notices of lease")]
struct Args {
    /// PDF file path to extract from
    #[arg(short = 'f', long = "file", default_value = "register.pdf")]
    file: PathBuf,

    /// JSON file to save result to
    #[arg(short = 'o', long = "output", default_value = "output.json")]
    output: PathBuf,

    /// Write the JSON to standard output instead of the output file
    #[arg(long, action = ArgAction::SetTrue)]
    stdout: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Format of the input file
    #[arg(long = "input-format", value_enum, default_value = "auto")]
    input_format: InputFormat,

    // === Layout options ===
    /// Page the schedule starts on (1-indexed)
    #[arg(long = "start-page", default_value = "4", value_parser = clap::value_parser!(u32).range(1..))]
    start_page: u32,

    /// Front-matter rows to skip before the first entry
    #[arg(long = "skip-rows", default_value = "24")]
    skip_rows: usize,

    /// Clip rectangle as left,top,right,bottom in page units
    #[arg(long, default_value = "50,116,600,812")]
    clip: ClipRect,

    /// Minimum number of spaces between two columns
    #[arg(long = "column-gap", default_value = "2")]
    column_gap: usize,

    /// Placement of lines that split into two columns
    #[arg(long = "two-chunk", value_enum, default_value = "leading-gap")]
    two_chunk: TwoChunk,

    /// Directory containing the PDFium library
    #[arg(long = "pdfium-dir")]
    pdfium_dir: Option<PathBuf>,
}

/// Build ScheduleParams from command line arguments.
fn build_params(args: &Args) -> lease_schedule_core::Result<ScheduleParams> {
    ScheduleParams::new(
        args.clip,
        args.start_page as usize - 1,
        args.skip_rows,
        args.column_gap,
        args.two_chunk.into(),
    )
}

/// Resolve `auto` by looking at the file header.
fn detect_format(path: &Path, requested: InputFormat) -> Result<InputFormat> {
    if requested != InputFormat::Auto {
        return Ok(requested);
    }
    let mut header = [0u8; 5];
    let mut file =
        fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let n = io::Read::read(&mut file, &mut header)?;
    if header[..n].starts_with(b"%PDF-") {
        Ok(InputFormat::Pdf)
    } else {
        Ok(InputFormat::Text)
    }
}

fn open_source(args: &Args) -> Result<Box<dyn PageTextSource>> {
    if !args.file.exists() {
        anyhow::bail!("file not found: {}", args.file.display());
    }
    let source: Box<dyn PageTextSource> = match detect_format(&args.file, args.input_format)? {
        InputFormat::Text => {
            let text = fs::read_to_string(&args.file)
                .with_context(|| format!("failed to read {}", args.file.display()))?;
            Box::new(TextPages::from_form_feed(&text))
        }
        _ => Box::new(PdfiumSource::new(&args.file, args.pdfium_dir.as_deref())?),
    };
    Ok(source)
}

fn run(args: &Args) -> Result<()> {
    let params = build_params(args)?;
    let mut source = open_source(args)?;

    info!("processing schedule of notices of leases from {}", args.file.display());
    let report = extract_schedule(source.as_mut(), Some(params))
        .with_context(|| format!("failed to process {}", args.file.display()))?;
    if !report.warnings.is_empty() {
        info!(
            "{} line(s) had ambiguous columns; run with --debug for details",
            report.warnings.len()
        );
    }

    if args.stdout {
        let mut out = io::stdout().lock();
        report.schedule.write_json(&mut out)?;
        writeln!(out)?;
        out.flush()?;
    } else {
        save_schedule(&report.schedule, &args.output)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
    }
    info!("done");
    Ok(())
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("error getting schedule of notices of leases: {:#}", e);
            let _ = Args::command().write_help(&mut io::stderr());
            ExitCode::FAILURE
        }
    }
}
