//! Batch processing command for multiple statement files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use khata_core::models::config::KhataConfig;
use khata_core::statement::StatementExtraction;

use super::process;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: super::process::OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<StatementExtraction>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        KhataConfig::from_file(std::path::Path::new(path))?
    } else {
        KhataConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "csv" | "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    // Set up progress bars
    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Process files sequentially; the per-file bar stays hidden so only the
    // overall bar renders.
    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let file_pb = ProgressBar::hidden();
        let result = process::extract_file(&path, &config, &file_pb);

        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(extraction) => {
                results.push(ProcessResult {
                    path: path.clone(),
                    extraction: Some(extraction),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path: path.clone(),
                        extraction: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    // Write outputs
    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(extraction), Some(output_dir)) = (&result.extraction, &args.output_dir) {
            let output_name = result.path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("statement");

            let extension = match args.format {
                super::process::OutputFormat::Json => "json",
                super::process::OutputFormat::Csv => "csv",
                super::process::OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{}.{}", output_name, extension));
            let content = process::format_extraction(extraction, args.format)?;

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args.output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "transactions",
        "total_credit",
        "total_debit",
        "account_number",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(extraction) = &result.extraction {
            let total_credit: f64 = extraction.transactions.iter().map(|t| t.credit).sum();
            let total_debit: f64 = extraction.transactions.iter().map(|t| t.debit).sum();

            wtr.write_record([
                filename,
                "success",
                &extraction.transactions.len().to_string(),
                &format!("{:.2}", total_credit),
                &format!("{:.2}", total_debit),
                &extraction.profile.account_number.clone().unwrap_or_default(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
