//! Scour: data-quality detection and remediation for tabular datasets.
//!
//! Scour scans a table for common defects (missing values, duplicate rows,
//! stray whitespace, casing variants, numbers stored as text, outliers,
//! repeated identifiers, inconsistent dates) and applies a deterministic set
//! of safe fixes, logging every action.
//!
//! # Core Principles
//!
//! - **Non-destructive**: every step returns a new table
//! - **Explainable**: fixes follow fixed conventions and are all logged
//! - **Total**: bad values are findings, never errors
//!
//! # Example
//!
//! ```no_run
//! use scour::Scour;
//!
//! let scour = Scour::new();
//! let report = scour.clean("employees.csv").unwrap();
//!
//! println!("Findings: {}", report.findings.len());
//! println!("Rows: {} -> {}", report.rows_before, report.rows_after);
//! ```
//!
//! The core also works on in-memory tables:
//!
//! ```
//! use scour::{Column, Table, analyze, remediate};
//!
//! let table = Table::new(vec![Column::numeric("score", vec![Some(10.0), None, Some(30.0)])]).unwrap();
//! let findings = analyze(&table);
//! let cleaned = remediate(&table, &findings);
//!
//! assert_eq!(cleaned.table.column("score").unwrap().numbers(), vec![10.0, 20.0, 30.0]);
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod quality;
pub mod remediate;
pub mod summary;
pub mod table;

mod scour;

pub use crate::scour::{AnalysisReport, CleanReport, FindingOverview, Scour, ScourConfig};
pub use error::{Result, ScourError};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use quality::{
    AnalyzerConfig, Finding, FindingKind, FindingSet, IdentifierPolicy, IdentifierRule,
    NameContains, NamedColumns, QualityAnalyzer, analyze,
};
pub use remediate::{
    ActionLog, ActionRecord, ImputationScope, Outcome, RemediationConfig, RemediationStep,
    Remediation, Remediator, remediate,
};
pub use summary::{ColumnSummarizer, ColumnSummary, summarize};
pub use table::{Cell, Column, ColumnKind, Table};
