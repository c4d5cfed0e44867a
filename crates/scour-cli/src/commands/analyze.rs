//! Analyze command - report data-quality findings.

use colored::Colorize;
use std::path::PathBuf;

use super::{build_scour, ensure_exists};

pub fn run(file: PathBuf, json: bool, config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;
    let scour = build_scour(config.as_deref())?;

    if !json {
        println!("{} {}", "Analyzing".cyan().bold(), file.display());
    }

    let report = scour.analyze(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(source) = &report.source {
        println!(
            "  {} rows x {} columns ({})",
            source.row_count, source.column_count, source.format
        );
    }
    println!();

    if report.findings.is_empty() {
        println!("{}", "No data-quality issues found.".green().bold());
        return Ok(());
    }

    println!("{}", "Findings".white().bold());
    for kind in report.findings.kinds() {
        let findings = report.findings.get(kind);
        println!(
            "  {} ({})",
            kind.label().yellow().bold(),
            findings.len()
        );
        for finding in findings {
            println!("    - {}", finding.description());
        }
    }

    let overview = &report.overview;
    println!();
    println!(
        "{} {} finding(s) across {} of {} column(s)",
        "Total:".white().bold(),
        overview.total_findings,
        overview.columns_with_issues,
        overview.total_columns
    );
    println!(
        "\nRun {} to fix the correctable issues.",
        format!("scour clean {}", file.display()).cyan()
    );

    Ok(())
}
