//! Parse command - decode one or two QR payloads into an invoice record.

use std::fs;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use clap::Args;
use console::style;

use einv_core::{parse, InvoiceRecord, QrInput};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// QR payload(s): the header code, optionally followed by the detail code
    #[arg(required = true, num_args = 1..=2)]
    codes: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Source label recorded in the csv row
    #[arg(long, default_value = "cli")]
    source: String,

    /// Report data issues the submission sink would reject the record for
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// One row in the persisted-sheet column order
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let input = match args.codes.as_slice() {
        [code] => QrInput::Single(code),
        [code_a, code_b] => QrInput::Dual(code_a, code_b),
        _ => unreachable!("clap caps codes at two"),
    };

    let record = parse(input)?;

    if args.validate {
        let issues = record.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Data issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_record(&record, args.format, &args.source)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if record.need_second_qr {
        eprintln!(
            "{} Detail section missing; scan the second code to complete the record",
            style("ℹ").blue()
        );
    }

    Ok(())
}

/// Column order of the external sheet sink.
pub const SHEET_COLUMNS: [&str; 10] = [
    "timestamp",
    "source",
    "invoice_number",
    "invoice_date",
    "random_code",
    "seller_vat",
    "buyer_vat",
    "amount",
    "items_json",
    "raw",
];

/// Assemble one sheet row; timestamp and source are supplied here, the rest
/// comes from the record.
pub fn sheet_row(record: &InvoiceRecord, source: &str) -> [String; 10] {
    [
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        source.to_string(),
        record.invoice_number.clone(),
        record.invoice_date.clone(),
        record.random_code.clone(),
        record.seller_vat.clone(),
        record.buyer_vat.clone(),
        record.amount.to_string(),
        record.items_json(),
        record.raw.clone(),
    ]
}

fn format_record(
    record: &InvoiceRecord,
    format: OutputFormat,
    source: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record, source),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &InvoiceRecord, source: &str) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(SHEET_COLUMNS)?;
    wtr.write_record(sheet_row(record, source))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", record.invoice_number));
    output.push_str(&format!("Date: {}\n", record.invoice_date));
    output.push_str(&format!("Random code: {}\n", record.random_code));
    output.push_str(&format!("Seller VAT: {}\n", record.seller_vat));
    if !record.buyer_vat.is_empty() {
        output.push_str(&format!("Buyer VAT: {}\n", record.buyer_vat));
    }
    output.push_str(&format!("Amount: {} TWD\n", record.amount));
    output.push('\n');

    output.push_str("Items:\n");
    if record.items.is_empty() {
        if record.need_second_qr {
            output.push_str("  (pending second scan)\n");
        } else {
            output.push_str("  (none)\n");
        }
    } else {
        for item in &record.items {
            output.push_str(&format!(
                "  {} x{} @{} = {}\n",
                item.name, item.quantity, item.unit_price, item.subtotal
            ));
        }
    }

    output
}
