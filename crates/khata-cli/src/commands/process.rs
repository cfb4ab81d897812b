//! Process command - extract transactions from a single statement file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use khata_core::models::config::KhataConfig;
use khata_core::models::transaction::{AccountProfile, Transaction};
use khata_core::statement::{DocumentParser, SheetGrid, SheetParser, StatementExtraction};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (CSV sheet export or plain-text statement)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Output envelope: transactions plus the best-effort account profile.
#[derive(Serialize)]
struct ProcessOutput<'a> {
    transactions: &'a [Transaction],
    account_profile: &'a AccountProfile,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        KhataConfig::from_file(Path::new(path))?
    } else {
        KhataConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let extraction = extract_file(&args.input, &config, &pb)?;
    pb.finish_with_message("Done");

    let output = format_extraction(&extraction, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {} ({} transactions)",
            style("✓").green(),
            output_path.display(),
            extraction.transactions.len()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub(crate) fn extract_file(
    input: &Path,
    config: &KhataConfig,
    pb: &ProgressBar,
) -> anyhow::Result<StatementExtraction> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let filename = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("statement")
        .to_string();

    match extension.as_str() {
        "csv" => {
            pb.set_message("Reading sheet...");
            pb.set_position(20);
            let sheet = read_csv_sheet(input)?;

            pb.set_message("Extracting transactions...");
            pb.set_position(60);
            let parser = SheetParser::new().with_config(config.extraction.clone());
            let extraction = parser.parse(&[sheet], &filename)?;

            pb.set_position(100);
            Ok(extraction)
        }
        "txt" | "text" => {
            pb.set_message("Reading pages...");
            pb.set_position(20);
            let pages = read_text_pages(input)?;

            pb.set_message("Extracting transactions...");
            pb.set_position(60);
            let extraction = DocumentParser::new().parse(&pages, &filename)?;

            pb.set_position(100);
            Ok(extraction)
        }
        _ => anyhow::bail!(
            "Unsupported file format: {} (expected a csv sheet export or txt page text)",
            extension
        ),
    }
}

/// Read a CSV export as one sheet of raw cells; the header row is detected
/// downstream, not assumed at line one.
fn read_csv_sheet(path: &Path) -> anyhow::Result<SheetGrid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string();

    Ok(SheetGrid::new(name, rows))
}

/// Read page text; form feeds separate pages, a file without any is a
/// single page.
fn read_text_pages(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.split('\x0c').map(str::to_string).collect())
}

pub(crate) fn format_extraction(
    extraction: &StatementExtraction,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let output = ProcessOutput {
                transactions: &extraction.transactions,
                account_profile: &extraction.profile,
            };
            Ok(serde_json::to_string(&output)?)
        }
        OutputFormat::Csv => format_csv(extraction),
        OutputFormat::Text => Ok(format_text(extraction)),
    }
}

fn format_csv(extraction: &StatementExtraction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Write header
    wtr.write_record([
        "date",
        "description",
        "amount",
        "credit",
        "debit",
        "balance",
        "party",
        "party_confidence",
        "category",
        "behavioral_deviation",
        "is_upi",
        "is_transfer",
        "source_file",
    ])?;

    // Write data
    for txn in &extraction.transactions {
        wtr.write_record([
            txn.date.clone().unwrap_or_default(),
            txn.description.clone(),
            txn.amount.to_string(),
            txn.credit.to_string(),
            txn.debit.to_string(),
            txn.balance.to_string(),
            txn.party.clone().unwrap_or_default(),
            txn.party_confidence.to_string(),
            txn.category.to_string(),
            txn.behavioral_deviation.to_string(),
            txn.is_upi.to_string(),
            txn.is_transfer.to_string(),
            txn.source_file.clone(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(extraction: &StatementExtraction) -> String {
    let mut output = String::new();

    if let Some(holder) = &extraction.profile.account_holder_name {
        output.push_str(&format!("Account holder: {}\n", holder));
    }
    if let Some(number) = &extraction.profile.account_number {
        output.push_str(&format!("Account number: {}\n", number));
    }
    if !extraction.profile.is_empty() {
        output.push_str("\n");
    }

    output.push_str(&format!(
        "{} transaction(s)\n\n",
        extraction.transactions.len()
    ));

    for txn in &extraction.transactions {
        output.push_str(&format!(
            "{:<10}  {:>12.2}  {}\n",
            txn.date.as_deref().unwrap_or("-"),
            txn.amount,
            txn.description
        ));
        if let Some(party) = &txn.party {
            output.push_str(&format!(
                "            party: {} ({:.2})\n",
                party, txn.party_confidence
            ));
        }
        output.push_str(&format!("            category: {}\n", txn.category));
    }

    output
}
