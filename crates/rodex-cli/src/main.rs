//! Rodex CLI - batch repair-order extraction from a folder of DOCX files.
//!
//! Scans a directory of documents, extracts the repair-order fields from
//! each one, deduplicates by repair-order identifier keeping the most
//! recently modified record, and writes the table as a pipe-delimited text
//! file and an XLSX workbook.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use rodex_backend::DocxDocument;
use rodex_core::{dedupe, export, extract_record, RepairRecord};
use std::fs;
use std::path::{Path, PathBuf};

/// Default input subdirectory, from the original report layout.
const DEFAULT_INPUT_DIR: &str = "CRE";
/// Default text export name, written next to the input directory.
const TEXT_EXPORT_NAME: &str = "extraction CRE.txt";
/// Default spreadsheet export name, written in the working directory.
const XLSX_EXPORT_NAME: &str = "extraction.xlsx";

#[derive(Parser, Debug)]
#[command(
    name = "rodex",
    about = "Extract repair-order records from a folder of DOCX documents",
    long_about = "Extract repair-order records from a folder of DOCX documents.\n\
                  \n\
                  Every file in the directory is processed; unreadable files are\n\
                  skipped and reported at the end of the run. Duplicate repair\n\
                  orders keep the most recently modified document.\n\
                  \n\
                  Defaults can be set via a .rodex.toml configuration file.",
    version
)]
struct Args {
    /// Directory containing the documents to process
    #[arg(value_name = "DIR")]
    input: Option<PathBuf>,

    /// Text export path (default: "extraction CRE.txt" next to DIR)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Spreadsheet export path (default: "extraction.xlsx")
    #[arg(long, value_name = "FILE")]
    xlsx_output: Option<PathBuf>,

    /// Skip the spreadsheet export
    #[arg(long)]
    no_xlsx: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Show per-document details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

/// One failed document: file name plus the error text, for the end-of-run
/// report.
struct Failure {
    file_name: String,
    message: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = Config::discover();

    let input_dir = args
        .input
        .clone()
        .or_else(|| config.input_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));

    let text_output = args
        .output
        .clone()
        .or_else(|| config.text_output.clone())
        .unwrap_or_else(|| default_text_output(&input_dir));

    let xlsx_output = args
        .xlsx_output
        .clone()
        .or_else(|| config.xlsx_output.clone())
        .unwrap_or_else(|| PathBuf::from(XLSX_EXPORT_NAME));

    let no_xlsx = args.no_xlsx || config.no_xlsx.unwrap_or(false);

    let files = list_input_files(&input_dir)
        .with_context(|| format!("Failed to read input directory {}", input_dir.display()))?;

    if !args.quiet {
        eprintln!(
            "{} Processing {} documents from {}...",
            "Info:".blue().bold(),
            files.len().to_string().cyan(),
            input_dir.display()
        );
    }

    let (records, failures) = process_documents(&files, args.quiet, args.verbose);

    let outcome = dedupe(records);

    if !args.quiet {
        report_duplicates(&outcome.duplicates);
    }

    let mut export_failed = false;

    match export::write_text(&text_output, &outcome.retained) {
        Ok(()) => {
            if !args.quiet {
                eprintln!("{} Wrote {}", "✓".green().bold(), text_output.display());
            }
        }
        Err(e) => {
            export_failed = true;
            eprintln!("{} {e}", "Error:".red().bold());
        }
    }

    if !no_xlsx {
        match export::write_xlsx(&xlsx_output, &outcome.retained) {
            Ok(()) => {
                if !args.quiet {
                    eprintln!("{} Wrote {}", "✓".green().bold(), xlsx_output.display());
                }
            }
            Err(e) => {
                export_failed = true;
                eprintln!(
                    "{} {e} (is the file open in another program?)",
                    "Error:".red().bold()
                );
            }
        }
    }

    if !failures.is_empty() {
        eprintln!("\n{}", "=== Documents skipped ===".bold());
        for failure in &failures {
            eprintln!(
                "{} {} - {}",
                "✗".red().bold(),
                failure.file_name.bright_white(),
                failure.message.red()
            );
        }
    }

    if !args.quiet {
        print_summary(files.len(), failures.len(), &outcome.retained);
    }

    if export_failed {
        anyhow::bail!("One or more exports failed");
    }

    Ok(())
}

/// Text export lands next to the input directory, mirroring the original
/// report layout (`CRE/` in, `extraction CRE.txt` beside it).
fn default_text_output(input_dir: &Path) -> PathBuf {
    input_dir
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(TEXT_EXPORT_NAME)
}

/// Every regular file in the directory, sorted by name for deterministic
/// runs. There is no extension filter: foreign files surface in the error
/// report when they fail to open, matching the original's behavior of
/// processing the full directory listing.
fn list_input_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            log::debug!("skipping subdirectory {}", path.display());
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Sequential document loop: one record per readable document, one failure
/// entry per unreadable one. A failed document contributes no record at
/// all, so the record set can never hold a partially extracted entry.
fn process_documents(
    files: &[PathBuf],
    quiet: bool,
    verbose: bool,
) -> (Vec<RepairRecord>, Vec<Failure>) {
    let progress = if quiet || files.is_empty() {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("template is compile-time constant")
                .progress_chars("█▓▒░  "),
        );
        pb
    };

    let mut records = Vec::new();
    let mut failures = Vec::new();

    for path in files {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        progress.set_message(file_name.clone());

        match DocxDocument::open(path) {
            Ok(doc) => {
                records.push(extract_record(&doc.paragraphs, doc.modified));
                if verbose {
                    progress.suspend(|| {
                        eprintln!("{} {}", "✓".green().bold(), file_name.bright_white());
                    });
                }
            }
            Err(e) => {
                failures.push(Failure {
                    file_name,
                    message: e.to_string(),
                });
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    (records, failures)
}

/// Duplicate-identifier report, printed before the exports run.
fn report_duplicates(duplicates: &[String]) {
    if duplicates.is_empty() {
        eprintln!("{} No duplicate repair orders found", "Info:".blue().bold());
    } else {
        eprintln!(
            "{} {} repair orders are referenced by more than one document; \
             keeping the most recently modified:",
            "Warning:".yellow().bold(),
            duplicates.len().to_string().yellow()
        );
        for id in duplicates {
            eprintln!("  {id}");
        }
    }
}

fn print_summary(total: usize, skipped: usize, retained: &[RepairRecord]) {
    eprintln!("\n{}", "=== Extraction Summary ===".bold());
    eprintln!("{:<16} {}", "Documents:", total.to_string().cyan());
    eprintln!(
        "{:<16} {}",
        "Extracted:",
        (total - skipped).to_string().green()
    );
    eprintln!(
        "{:<16} {}",
        "Skipped:",
        if skipped > 0 {
            skipped.to_string().red()
        } else {
            skipped.to_string().normal()
        }
    );
    eprintln!(
        "{:<16} {}",
        "Repair orders:",
        retained.len().to_string().cyan()
    );
}
