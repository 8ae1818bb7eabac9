//! Batch command - parse a file of payload lines.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{error, warn};

use einv_core::{parse, InvoiceRecord, QrInput};

use super::parse::{sheet_row, SHEET_COLUMNS};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input file: one invoice per line, a TAB separating dual codes
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for the collected records
    #[arg(short, long, value_enum, default_value = "jsonl")]
    format: BatchFormat,

    /// Source label recorded in csv rows
    #[arg(long, default_value = "batch")]
    source: String,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BatchFormat {
    /// One JSON record per line
    Jsonl,
    /// Rows in the persisted-sheet column order
    Csv,
}

/// Result of parsing a single input line.
struct LineResult {
    line_no: usize,
    record: Option<InvoiceRecord>,
    error: Option<String>,
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let content = fs::read_to_string(&args.input)?;
    let mut results = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parsed = match line.split_once('\t') {
            Some((code_a, code_b)) => parse(QrInput::Dual(code_a, code_b)),
            None => parse(QrInput::Single(line)),
        };

        match parsed {
            Ok(record) => results.push(LineResult {
                line_no,
                record: Some(record),
                error: None,
            }),
            Err(e) => {
                if args.continue_on_error {
                    warn!("Failed to parse line {}: {}", line_no, e);
                    results.push(LineResult {
                        line_no,
                        record: None,
                        error: Some(e.to_string()),
                    });
                } else {
                    error!("Failed to parse line {}: {}", line_no, e);
                    anyhow::bail!("Parsing failed at line {}: {}", line_no, e);
                }
            }
        }
    }

    if results.is_empty() {
        anyhow::bail!("No payload lines found in {}", args.input.display());
    }

    let successful: Vec<&InvoiceRecord> =
        results.iter().filter_map(|r| r.record.as_ref()).collect();
    let failed: Vec<&LineResult> = results.iter().filter(|r| r.error.is_some()).collect();

    let output = match args.format {
        BatchFormat::Jsonl => {
            let mut lines = Vec::with_capacity(successful.len());
            for record in &successful {
                lines.push(serde_json::to_string(record)?);
            }
            lines.join("\n") + "\n"
        }
        BatchFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(SHEET_COLUMNS)?;
            for record in &successful {
                wtr.write_record(sheet_row(record, &args.source))?;
            }
            String::from_utf8(wtr.into_inner()?)?
        }
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    // Summary goes to stderr so piped output stays clean
    eprintln!(
        "{} Parsed {} lines in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed lines:").red());
        for result in &failed {
            eprintln!(
                "  - line {}: {}",
                result.line_no,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}
