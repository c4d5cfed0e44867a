//! Summary command - per-column statistics.

use colored::Colorize;
use std::fmt::Display;
use std::path::PathBuf;

use scour::ColumnSummary;

use super::{build_scour, ensure_exists};

pub fn run(file: PathBuf, json: bool, config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;
    let scour = build_scour(config.as_deref())?;

    let (table, _) = scour.load(&file)?;
    let summary = scour.summarize_table(&table);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows)",
        "Summary of".cyan().bold(),
        file.display(),
        table.row_count()
    );
    println!();

    for column in &summary {
        print_column(column);
    }

    Ok(())
}

fn print_column(column: &ColumnSummary) {
    println!(
        "{} [{}]  count: {}  missing: {}",
        column.name.white().bold(),
        column.kind,
        column.count,
        column.missing
    );

    if let Some(numeric) = &column.numeric {
        println!(
            "  mean: {}  median: {}  std: {}",
            fmt_stat(numeric.mean),
            fmt_stat(numeric.median),
            fmt_stat(numeric.std_dev)
        );
        println!("  min: {}  max: {}", fmt_stat(numeric.min), fmt_stat(numeric.max));
        if !numeric.modes.is_empty() {
            let modes: Vec<String> = numeric.modes.iter().map(|m| m.to_string()).collect();
            println!("  mode: {}", modes.join(", "));
        }
    }

    if let Some(text) = &column.text {
        match text.unique_percent {
            Some(percent) => println!("  unique: {} ({:.1}% of rows)", text.unique, percent),
            None => println!("  unique: {}", text.unique),
        }
        for entry in &text.top_values {
            println!("    {:>6}  {}", entry.count, entry.value);
        }
    }

    if let Some(temporal) = &column.temporal {
        println!(
            "  earliest: {}  latest: {}  unique: {}",
            fmt_or_dash(temporal.min),
            fmt_or_dash(temporal.max),
            temporal.unique
        );
    }

    println!();
}

fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}

fn fmt_or_dash<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
