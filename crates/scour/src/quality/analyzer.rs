//! Runs every check over a table, in a fixed order.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::table::Table;

use super::checks::{
    CasingCheck, Check, DateFormatCheck, DuplicateRowsCheck, MissingValuesCheck, OutlierCheck,
    UniquenessCheck, WhitespaceCheck, WrongTypeCheck,
};
use super::finding::FindingSet;
use super::policy::{IdentifierPolicy, IdentifierRule};

/// Analyzer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// IQR fence multiplier for outliers.
    pub iqr_multiplier: f64,
    /// Maximum examples kept per finding.
    pub sample_size: usize,
    /// Which columns are identifiers.
    pub identifier: IdentifierRule,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            sample_size: 5,
            identifier: IdentifierRule::default(),
        }
    }
}

/// Detects data-quality defects.
pub struct QualityAnalyzer {
    config: AnalyzerConfig,
    policy: Arc<dyn IdentifierPolicy>,
    checks: Vec<Box<dyn Check>>,
}

impl QualityAnalyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create an analyzer from settings.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        let policy: Arc<dyn IdentifierPolicy> = Arc::new(config.identifier.clone());
        let checks = build_checks(&config, Arc::clone(&policy));
        Self {
            config,
            policy,
            checks,
        }
    }

    /// Replace the identifier policy from the configuration.
    pub fn with_identifier_policy(mut self, policy: impl IdentifierPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self.checks = build_checks(&self.config, Arc::clone(&self.policy));
        self
    }

    /// Get the analyzer settings.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run every check and collect the findings.
    pub fn analyze(&self, table: &Table) -> FindingSet {
        let mut findings = FindingSet::new();

        for check in &self.checks {
            let found = check.run(table);
            debug!(check = check.kind().label(), findings = found.len(), "check complete");
            for finding in found {
                findings.push(finding);
            }
        }

        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            findings = findings.len(),
            "analysis complete"
        );
        findings
    }
}

fn build_checks(config: &AnalyzerConfig, policy: Arc<dyn IdentifierPolicy>) -> Vec<Box<dyn Check>> {
    vec![
        Box::new(MissingValuesCheck),
        Box::new(DuplicateRowsCheck),
        Box::new(WhitespaceCheck),
        Box::new(CasingCheck),
        Box::new(WrongTypeCheck),
        Box::new(OutlierCheck::new(config.iqr_multiplier, config.sample_size)),
        Box::new(UniquenessCheck::new(policy, config.sample_size)),
        Box::new(DateFormatCheck),
    ]
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QualityAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QualityAnalyzer")
            .field("config", &self.config)
            .field("checks", &self.checks.len())
            .finish()
    }
}

/// Analyze `table` with default settings.
pub fn analyze(table: &Table) -> FindingSet {
    QualityAnalyzer::new().analyze(table)
}
