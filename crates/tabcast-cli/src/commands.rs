//! Subcommand implementations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use tabcast_ingest::{normalize_json, normalize_tabular, normalize_workbook};
use tabcast_model::{ConvertError, PreviewOptions, RecordSet};
use tabcast_output::{OutputFormat, serialize};

use crate::cli::{ConvertArgs, PreviewArgs};

/// Errors surfaced to the terminal.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("failed to render preview: {0}")]
    Render(#[from] serde_json::Error),

    #[error("unsupported input file: {path} (expected .xlsx, .xlsm, .csv, .tsv, .txt, or .json)")]
    UnsupportedInput { path: PathBuf },
}

/// Converts the input file and writes the serialized output.
///
/// Returns the path the output was written to.
pub fn run_convert(args: &ConvertArgs) -> Result<PathBuf, CliError> {
    let format = OutputFormat::from(args.format);
    let set = normalize_path(&args.input)?;
    let rendered = serialize(&set, format)?;

    let output_path = match &args.output {
        Some(path) => path.clone(),
        None => default_output_path(&args.input, format),
    };
    fs::write(&output_path, rendered).map_err(|source| CliError::Write {
        path: output_path.clone(),
        source,
    })?;

    info!(
        input = %args.input.display(),
        output = %output_path.display(),
        format = format.as_str(),
        "conversion complete"
    );
    Ok(output_path)
}

/// Prints a truncated JSON preview of the normalized input to stdout.
pub fn run_preview(args: &PreviewArgs) -> Result<(), CliError> {
    let set = normalize_path(&args.input)?;
    let options = PreviewOptions {
        max_rows: args.rows,
        ..PreviewOptions::default()
    };
    let preview = set.preview(&options);
    let rendered = serde_json::to_string_pretty(&preview)?;
    println!("{rendered}");
    Ok(())
}

/// Lists the supported output formats.
pub fn run_formats() {
    for format in OutputFormat::ALL {
        println!("{:<6} {}", format.as_str(), format.description());
    }
}

/// Reads a file and dispatches to the reader for its extension.
fn normalize_path(path: &Path) -> Result<RecordSet, CliError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| CliError::UnsupportedInput {
            path: path.to_path_buf(),
        })?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("input")
        .to_owned();

    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let set = match extension.as_str() {
        "xlsx" | "xlsm" => normalize_workbook(&bytes, &filename)?,
        "json" => normalize_json(&bytes, &filename)?,
        "csv" | "tsv" | "txt" => normalize_tabular(&bytes, &filename)?,
        _ => {
            return Err(CliError::UnsupportedInput {
                path: path.to_path_buf(),
            });
        }
    };
    Ok(set)
}

/// `<stem>_converted.<ext>` next to the input file.
fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}_converted.{}", format.extension()))
}
