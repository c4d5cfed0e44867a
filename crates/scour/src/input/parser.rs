//! CSV/TSV loader with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Result, ScourError};
use crate::inference::{DEFAULT_NULL_TOKENS, KindClassifier};
use crate::table::{Column, Table};

use super::source::SourceMetadata;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Lines sampled for delimiter detection.
const DETECTION_LINES: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Raw values read as missing.
    pub null_tokens: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Loads delimited text into a [`Table`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let io_error = |source| ScourError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_error)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_error)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = self.resolve_delimiter(&contents)?;
        let table = self.parse_with_delimiter(&contents, delimiter)?;

        info!(
            file = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            delimiter,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse bytes, detecting the delimiter unless one is configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let delimiter = self.resolve_delimiter(bytes)?;
        self.parse_with_delimiter(bytes, delimiter)
    }

    fn resolve_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(d) if !d.is_ascii() || d == self.config.quote || d == b'\n' || d == b'\r' => Err(
                ScourError::InvalidDelimiter(format!("{:?} cannot separate fields", d as char)),
            ),
            Some(d) => Ok(d),
            None => {
                let detected = detect_delimiter(bytes, self.config.quote)?;
                debug!(delimiter = ?(detected as char), "detected delimiter");
                Ok(detected)
            }
        }
    }

    fn parse_with_delimiter(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next() {
                Some(record) => record?.iter().map(|s| s.to_string()).collect(),
                None => return Err(ScourError::EmptyData("No header row found".to_string())),
            }
        } else {
            Vec::new()
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (row_idx, result) in records.enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }
            rows.push(result?.iter().map(|s| s.to_string()).collect());
        }

        let headers = if self.config.has_header {
            headers
        } else {
            match rows.first() {
                Some(first) => (0..first.len()).map(|i| format!("column_{}", i + 1)).collect(),
                None => return Err(ScourError::EmptyData("No data rows found".to_string())),
            }
        };

        if headers.is_empty() {
            return Err(ScourError::EmptyData("No columns found".to_string()));
        }

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ScourError::RaggedRow {
                    row: row_idx + 1,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
        }

        let classifier = KindClassifier::with_null_tokens(self.config.null_tokens.clone());
        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(col_idx, name)| {
                let values: Vec<&str> = rows.iter().map(|row| row[col_idx].as_str()).collect();
                let column = classifier.build_column(name.as_str(), &values);
                debug!(column = %column.name, kind = %column.kind, "classified column");
                column
            })
            .collect();

        Table::new(columns)
    }
}

/// Detect the delimiter by analyzing the first few lines.
///
/// A delimiter that appears the same number of times on every sampled line
/// wins; tab breaks ties since it rarely occurs inside values. Text inside
/// `quote` characters is not counted.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .take(DETECTION_LINES)
        .collect();

    if lines.is_empty() {
        return Err(ScourError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best = (b',', 0usize);
    for &delim in DELIMITERS.iter().filter(|&&d| d != quote) {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim, quote))
            .collect();

        let first = counts[0];
        if first == 0 {
            continue;
        }

        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / counts.len() as f64;

        let score = if counts.iter().all(|&c| c == first) {
            first * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first * 100
        } else {
            first
        };

        if score > best.1 {
            best = (delim, score);
        }
    }

    Ok(best.0)
}

/// Count delimiter occurrences in a line, ignoring quoted sections.
fn count_delimiter_in_line(line: &str, delimiter: u8, quote: u8) -> usize {
    let delim_char = delimiter as char;
    let quote_char = quote as char;
    let mut in_quotes = false;

    line.chars()
        .filter(|&ch| {
            if ch == quote_char {
                in_quotes = !in_quotes;
            }
            ch == delim_char && !in_quotes
        })
        .count()
}
