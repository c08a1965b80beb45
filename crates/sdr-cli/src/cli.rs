//! CLI argument definitions for the SDR converter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sdr_model::FormatId;

#[derive(Parser)]
#[command(
    name = "sdr-convert",
    version,
    about = "SDR converter - Convert fixed-width SDR data returns to CSV",
    long_about = "Convert fixed-width SDR data-return files to CSV.\n\n\
                  Supports student (STUD), course enrolment (COUR), course register (CREG),\n\
                  completion (COMP) and qualification (QUAL) files. Course enrolment rows can\n\
                  be joined with completion indicators from a companion COMP file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow record values (student ids, course keys) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Load layouts from a directory holding manifest.toml instead of the
    /// built-in tables.
    #[arg(long = "layouts", value_name = "DIR", global = true)]
    pub layouts: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert the given files to CSV.
    Convert(ConvertArgs),

    /// Convert every SDR data file found in a directory.
    Scan(ScanArgs),

    /// List the supported formats and their layouts.
    Formats,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Fixed-width input files.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Directory to scan for `.txt` data files.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Only convert files of this format (STUD, COUR, CREG, COMP, QUAL).
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<FormatId>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Directory for the generated CSV files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Append the completion indicator from the companion COMP file to
    /// course enrolment output.
    #[arg(long = "with-completion")]
    pub with_completion: bool,

    /// Decode files without writing any output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a JSON report of every file's result.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
