//! Main Scour struct and public API.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScourError};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::quality::{AnalyzerConfig, FindingKind, FindingSet, IdentifierPolicy, QualityAnalyzer};
use crate::remediate::{ActionLog, RemediationConfig, Remediator};
use crate::summary::{ColumnSummarizer, ColumnSummary};
use crate::table::Table;

/// Configuration for a Scour run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScourConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Analyzer configuration.
    pub analyzer: AnalyzerConfig,
    /// Remediation configuration.
    pub remediation: RemediationConfig,
}

impl ScourConfig {
    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ScourError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ScourConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that settings are usable.
    pub fn validate(&self) -> Result<()> {
        let k = self.analyzer.iqr_multiplier;
        if !k.is_finite() || k < 0.0 {
            return Err(ScourError::Config(format!(
                "iqr_multiplier must be a non-negative number, got {}",
                k
            )));
        }
        if self.analyzer.sample_size == 0 {
            return Err(ScourError::Config("sample_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Counts of findings by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FindingOverview {
    /// Total number of columns.
    pub total_columns: usize,
    /// Columns named by at least one finding.
    pub columns_with_issues: usize,
    /// Total number of findings.
    pub total_findings: usize,
    /// Findings per kind, in evaluation order.
    pub by_kind: IndexMap<FindingKind, usize>,
}

impl FindingOverview {
    /// Tally `findings` against `table`.
    pub fn new(table: &Table, findings: &FindingSet) -> Self {
        let columns: HashSet<&str> = findings.iter().filter_map(|f| f.column()).collect();
        Self {
            total_columns: table.column_count(),
            columns_with_issues: columns.len(),
            total_findings: findings.len(),
            by_kind: findings
                .kinds()
                .map(|kind| (kind, findings.get(kind).len()))
                .collect(),
        }
    }
}

/// Result of analyzing a table.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Metadata about the source file, when loaded from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Detected defects.
    pub findings: FindingSet,
    /// Per-column statistics.
    pub summary: Vec<ColumnSummary>,
    /// Finding counts.
    pub overview: FindingOverview,
}

/// Result of analyzing and remediating a table.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// Metadata about the source file, when loaded from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Defects found before cleaning.
    pub findings: FindingSet,
    /// What remediation did.
    pub log: ActionLog,
    /// The cleaned table.
    #[serde(skip)]
    pub table: Table,
    pub rows_before: usize,
    pub rows_after: usize,
}

/// The main Scour engine.
#[derive(Debug)]
pub struct Scour {
    config: ScourConfig,
    parser: Parser,
    analyzer: QualityAnalyzer,
    remediator: Remediator,
    summarizer: ColumnSummarizer,
}

impl Scour {
    /// Create a new Scour instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(ScourConfig::default())
    }

    /// Create a Scour instance with custom configuration.
    pub fn with_config(config: ScourConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser.clone()),
            analyzer: QualityAnalyzer::with_config(config.analyzer.clone()),
            remediator: Remediator::with_config(config.remediation.clone()),
            summarizer: ColumnSummarizer::new(),
            config,
        }
    }

    /// Use a custom rule for picking identifier columns.
    pub fn with_identifier_policy(mut self, policy: impl IdentifierPolicy + 'static) -> Self {
        self.analyzer = self.analyzer.with_identifier_policy(policy);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &ScourConfig {
        &self.config
    }

    /// Load a data file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Analyze a data file.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let (table, source) = self.load(path)?;
        let mut report = self.analyze_table(&table);
        report.source = Some(source);
        Ok(report)
    }

    /// Analyze an in-memory table.
    pub fn analyze_table(&self, table: &Table) -> AnalysisReport {
        let findings = self.analyzer.analyze(table);
        AnalysisReport {
            source: None,
            summary: self.summarizer.summarize(table),
            overview: FindingOverview::new(table, &findings),
            findings,
        }
    }

    /// Summarize the columns of an in-memory table.
    pub fn summarize_table(&self, table: &Table) -> Vec<ColumnSummary> {
        self.summarizer.summarize(table)
    }

    /// Analyze and clean a data file.
    pub fn clean(&self, path: impl AsRef<Path>) -> Result<CleanReport> {
        let (table, source) = self.load(path)?;
        let mut report = self.clean_table(&table);
        report.source = Some(source);
        Ok(report)
    }

    /// Analyze and clean an in-memory table.
    pub fn clean_table(&self, table: &Table) -> CleanReport {
        let findings = self.analyzer.analyze(table);
        let remediation = self.remediator.remediate(table, &findings);

        info!(
            findings = findings.len(),
            rows_removed = remediation.log.rows_removed(),
            "cleaned table"
        );

        CleanReport {
            source: None,
            findings,
            rows_before: table.row_count(),
            rows_after: remediation.table.row_count(),
            log: remediation.log,
            table: remediation.table,
        }
    }
}

impl Default for Scour {
    fn default() -> Self {
        Self::new()
    }
}
