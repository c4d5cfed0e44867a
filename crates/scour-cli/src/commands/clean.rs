//! Clean command - fix correctable findings and write the cleaned data.

use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use scour::input::{write_delimited, write_json_records};
use scour::{ActionLog, Outcome, Table};

use super::{build_scour, ensure_exists, sibling_path};
use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    log: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;
    let scour = build_scour(config.as_deref())?;

    println!("{} {}", "Cleaning".cyan().bold(), file.display());

    let report = scour.clean(&file)?;
    println!(
        "  {} finding(s), {} action(s)",
        report.findings.len(),
        report.log.len()
    );
    println!();

    print_log(&report.log);

    let output_path = output.unwrap_or_else(|| sibling_path(&file, "cleaned", format.extension()));
    write_table(&report.table, &output_path, format)?;

    if let Some(log_path) = log {
        let mut writer = BufWriter::new(File::create(&log_path)?);
        serde_json::to_writer_pretty(&mut writer, &report.log)?;
        writer.flush()?;
        println!("{} {}", "Action log:".white().bold(), log_path.display());
    }

    println!();
    println!(
        "{} {} -> {} rows, {} value(s) changed",
        "Done.".green().bold(),
        report.rows_before,
        report.rows_after,
        report.log.values_changed()
    );
    println!("  {} {}", "Written to:".white().bold(), output_path.display());

    Ok(())
}

fn print_log(log: &ActionLog) {
    if log.is_empty() {
        println!("{}", "Nothing to clean.".green());
        return;
    }

    println!("{}", "Actions".white().bold());
    for action in log {
        match &action.outcome {
            Outcome::Applied => println!("  {} {}", "✓".green(), action.description),
            Outcome::Skipped { .. } => {
                println!("  {} {}", "-".yellow(), action.description.dimmed())
            }
        }
    }
}

fn write_table(table: &Table, path: &Path, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Csv => write_delimited(table, &mut writer, b',')?,
        OutputFormat::Tsv => write_delimited(table, &mut writer, b'\t')?,
        OutputFormat::Json => write_json_records(table, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}
