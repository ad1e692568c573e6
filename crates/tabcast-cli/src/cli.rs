//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tabcast_output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "tabcast",
    version,
    about = "Normalize spreadsheet, delimited-text, and JSON files into JSON/JSONL/CSV",
    long_about = "Normalize heterogeneous tabular files into a canonical record model\n\
                  and serialize it as structured JSON, line-delimited JSON, or CSV.\n\n\
                  Supported inputs: .xlsx/.xlsm workbooks, .csv/.tsv/.txt delimited text,\n\
                  and arbitrary .json payloads. Encoding and delimiter are detected\n\
                  automatically."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for silence).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a file and write the serialized output.
    Convert(ConvertArgs),

    /// Print a truncated preview of the normalized data.
    Preview(PreviewArgs),

    /// List supported output formats.
    Formats,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Input file (.xlsx, .xlsm, .csv, .tsv, .txt, or .json).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output format to generate.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: FormatArg,

    /// Output path (default: <input stem>_converted.<ext> next to the input).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Input file (.xlsx, .xlsm, .csv, .tsv, .txt, or .json).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Maximum rows shown per table or sheet.
    #[arg(long = "rows", value_name = "N", default_value_t = 100)]
    pub rows: usize,
}

/// CLI output format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Jsonl,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Jsonl => OutputFormat::Jsonl,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
