//! `nalframe` converts a file between Annex-B and length-prefixed framing.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, error::ErrorKind};
use nalframe::{
    ConvertOptions, ConvertSummary, TruncationPolicy, annexb_to_length_prefixed,
    length_prefixed_to_annexb,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Rewrites an H.264/H.265 elementary stream from Annex-B start codes to
/// 4-byte big-endian length prefixes, or back with `--to-annexb`.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Stream to read
    input: PathBuf,

    /// File to create or truncate
    output: PathBuf,

    /// Read length-prefixed records and write Annex-B
    #[clap(long)]
    to_annexb: bool,

    /// Stop after reading this many input bytes
    #[clap(long, value_name = "N")]
    max_bytes: Option<u64>,

    /// Read buffer growth step in bytes
    #[clap(long, value_name = "N", default_value = "4096", value_parser = clap::value_parser!(u32).range(1..))]
    chunk_size: u32,

    /// Also write the unit after the last start code
    #[clap(long)]
    flush_trailing: bool,

    /// Copy a record cut short by end of input instead of failing
    #[clap(long)]
    allow_truncated: bool,
}

impl Args {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            max_input_bytes: self.max_bytes.unwrap_or(u64::MAX),
            chunk_size: self.chunk_size as usize,
            truncation: if self.allow_truncated {
                TruncationPolicy::CopyAvailable
            } else {
                TruncationPolicy::Error
            },
            flush_trailing: self.flush_trailing,
        }
    }
}

fn open_input(path: &Path) -> Result<File> {
    let file =
        File::open(path).with_context(|| format!("Error opening file [{}]", path.display()))?;
    info!("opened input [{}]", path.display());
    Ok(file)
}

fn create_output(path: &Path) -> Result<File> {
    let file =
        File::create(path).with_context(|| format!("Error opening file [{}]", path.display()))?;
    info!("opened output [{}]", path.display());
    Ok(file)
}

fn run(args: &Args) -> Result<ConvertSummary> {
    let input = BufReader::new(open_input(&args.input)?);
    let output = BufWriter::new(create_output(&args.output)?);
    let options = args.options();

    let summary = if args.to_annexb {
        length_prefixed_to_annexb(input, output, &options)
    } else {
        annexb_to_length_prefixed(input, output, &options)
    }
    .context("conversion failed")?;
    Ok(summary)
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(255);
        }
    };

    match run(&args) {
        Ok(summary) => {
            info!("read: bytes {}, unit {}", summary.bytes_read, summary.units);
        }
        Err(e) => {
            error!("{e:#}");
        }
    }
    ExitCode::SUCCESS
}
