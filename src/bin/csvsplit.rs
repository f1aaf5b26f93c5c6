//! Command-line front end for `csvsplit`.
//!
//! ```text
//! csvsplit -n 50000 -p part exports/*.csv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use csvsplit::config::{Settings, parse_delimiter};
use csvsplit::io::glob::expand_inputs;
use csvsplit::validation::validate_chunk_size;
use csvsplit::{
    BatchReport, EmptyInputPolicy, NoProgress, ProgressSink, ReadMode, SplitConfig, SplitError,
    split_batch,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "csvsplit", version, about = "Split CSV files into fixed-size row chunks")]
struct Cli {
    /// Input CSV files or glob patterns.
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Maximum data rows per chunk.
    #[arg(short = 'n', long = "chunk-size", allow_negative_numbers = true)]
    chunk_size: Option<i64>,

    /// Directory in which the `entries_*` output directory is created.
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Prefix inserted into every output file name.
    #[arg(short = 'p', long)]
    prefix: Option<String>,

    /// Field delimiter (single ASCII character, or `tab`).
    #[arg(short = 'd', long)]
    delimiter: Option<String>,

    /// Treat the first row as data; chunks get no header.
    #[arg(long = "no-headers", action = ArgAction::SetTrue)]
    no_headers: bool,

    /// Load each input fully before writing chunks.
    #[arg(long = "in-memory", action = ArgAction::SetTrue)]
    in_memory: bool,

    /// Write nothing for inputs without data rows.
    #[arg(long = "skip-empty", action = ArgAction::SetTrue)]
    skip_empty: bool,

    /// Settings file (defaults to `csvsplit.*` in the working directory, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON report of the batch to this file.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Do not print progress updates.
    #[arg(long = "no-progress", action = ArgAction::SetTrue)]
    no_progress: bool,

    /// More logging (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, action = ArgAction::SetTrue, conflicts_with = "verbose")]
    quiet: bool,
}

/// Prints `progress: NN%` lines to stderr.
struct StderrProgress {
    last: u8,
}

impl ProgressSink for StderrProgress {
    fn set(&mut self, percent: u8) {
        self.last = percent;
    }

    fn flush(&mut self) {
        eprintln!("progress: {}%", self.last);
    }
}

fn init_logging(cli: &Cli) {
    let default = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge settings with command-line overrides. Flags win.
fn build_config(cli: &Cli) -> Result<SplitConfig, SplitError> {
    let settings = Settings::load(cli.config.as_deref()).map_err(SplitError::Settings)?;
    let mut cfg = settings.to_config()?;
    if let Some(raw) = cli.chunk_size {
        cfg = cfg.chunk_size(validate_chunk_size(raw)?);
    }
    if let Some(dir) = &cli.output_dir {
        cfg = cfg.output_dir(dir);
    }
    if let Some(prefix) = &cli.prefix {
        cfg = cfg.prefix(prefix.clone());
    }
    if let Some(d) = &cli.delimiter {
        cfg = cfg.delimiter(parse_delimiter(d)?);
    }
    if cli.no_headers {
        cfg = cfg.has_headers(false);
    }
    if cli.in_memory {
        cfg = cfg.read_mode(ReadMode::InMemory);
    }
    if cli.skip_empty {
        cfg = cfg.empty_input(EmptyInputPolicy::NoChunks);
    }
    Ok(cfg)
}

fn run(cli: &Cli) -> Result<BatchReport, SplitError> {
    let cfg = build_config(cli)?;
    let inputs = expand_inputs(&cli.inputs)?;

    let mut stderr_progress = StderrProgress { last: 0 };
    let mut no_progress = NoProgress;
    let progress: &mut dyn ProgressSink = if cli.no_progress {
        &mut no_progress
    } else {
        &mut stderr_progress
    };

    let report = split_batch(&inputs, &cfg, progress)?;

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report).context("serialize batch report")?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(report) => {
            println!("CSV splitting completed!");
            println!(
                "{} file(s), {} row(s), {} chunk(s) in {}",
                report.files.len(),
                report.total_rows(),
                report.chunk_count(),
                report.output_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e @ SplitError::InvalidExtension { .. }) => {
            tracing::error!(error = %e, "pre-flight check failed");
            eprintln!("Error: Please select valid CSV files. ({e})");
            ExitCode::from(2)
        }
        Err(e) if e.is_preflight() => {
            tracing::error!(error = %e, "pre-flight check failed");
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = %e, "batch aborted");
            eprintln!("Error: An error occurred: {e}");
            ExitCode::from(1)
        }
    }
}
