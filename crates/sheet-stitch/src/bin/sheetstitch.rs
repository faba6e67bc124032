use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sheet_stitch::{
    CombinedTable, EXPORT_FILE_NAME, EncodingLabel, ExportOptions, StitchEvent, StitchOptions,
    StitchReport, TablePreview, UploadedFile, stitch_with_options, write_csv,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "sheetstitch",
    version,
    about = "Combine CSV/XLS/XLSX files into one CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Concatenate spreadsheets and write the combined CSV.
    Stitch(StitchArgs),
}

#[derive(Debug, Args)]
struct StitchArgs {
    /// Input files; `.xls`/`.xlsx` are read as workbooks, anything else as CSV.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output CSV path.
    #[arg(short, long, default_value = EXPORT_FILE_NAME)]
    output: PathBuf,

    /// Remove rows that repeat an earlier row exactly.
    #[arg(short, long)]
    deduplicate: bool,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Delimiter used by the CSV inputs.
    #[arg(long, default_value = ",")]
    input_delimiter: char,

    /// Text encoding of the CSV inputs (utf-8, big5, windows-1252, ...).
    #[arg(long, default_value = "utf-8")]
    encoding: EncodingLabel,

    /// Write the 0-based row index as the first column.
    #[arg(long)]
    index: bool,

    /// Print the first N combined rows to stdout.
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Enable debug log output.
    #[arg(short, long)]
    verbose: bool,
}

fn ascii_delimiter(value: char, flag: &str) -> Result<u8> {
    match u8::try_from(value) {
        Ok(byte) if byte.is_ascii() => Ok(byte),
        _ => anyhow::bail!("{flag} must be a single ASCII character"),
    }
}

fn parse_options(args: &StitchArgs) -> Result<(StitchOptions, ExportOptions)> {
    let stitch_options = StitchOptions {
        deduplicate: args.deduplicate,
        csv_delimiter: ascii_delimiter(args.input_delimiter, "--input-delimiter")?,
        csv_encoding: args.encoding.0,
    };
    let export_options = ExportOptions {
        delimiter: ascii_delimiter(args.delimiter, "--delimiter")?,
        include_index: args.index,
    };
    Ok((stitch_options, export_options))
}

fn load_inputs(paths: &[PathBuf]) -> Result<Vec<UploadedFile>> {
    paths
        .iter()
        .map(|path| {
            UploadedFile::from_path(path)
                .with_context(|| format!("failed to read '{}'", path.display()))
        })
        .collect()
}

fn log_report(report: &StitchReport) {
    eprintln!(
        "stitched {} file(s), skipped {}",
        report.succeeded.len(),
        report.skipped.len()
    );
    if let Some(removed) = report.duplicates_removed {
        eprintln!("removed {removed} duplicate row(s)");
    }
}

fn run_stitch(args: &StitchArgs) -> Result<(CombinedTable, StitchReport)> {
    let (stitch_options, export_options) = parse_options(args)?;
    let files = load_inputs(&args.inputs)?;

    // Status lines reach stderr through the tracing subscriber.
    let (table, report) =
        stitch_with_options(&files, &stitch_options, &mut |_: &StitchEvent| {})
            .context("failed to stitch spreadsheets")?;

    write_csv(&args.output, &table, &export_options)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;
    Ok((table, report))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Commands::Stitch(args) = cli.command;

    let default_filter = if args.verbose {
        "sheet_stitch=debug"
    } else {
        "sheet_stitch=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match run_stitch(&args) {
        Ok((table, report)) => {
            log_report(&report);
            if let Some(limit) = args.preview {
                print!("{}", TablePreview::new(&table, limit).render_text());
            }
            if table.is_empty() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
