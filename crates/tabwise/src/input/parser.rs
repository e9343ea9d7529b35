//! CSV/TSV loader with delimiter detection and value inference.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::dataset::{CellValue, Dataset, DatasetMetadata, Row};
use crate::error::{Result, TabwiseError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Use a fixed delimiter instead of auto-detection.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Stop after `max_rows` data rows.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Loads delimited text into a [`Dataset`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Load a file into a dataset named after the file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| TabwiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let source_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.parse_bytes(&contents, source_name)
    }

    /// Load in-memory bytes into a dataset.
    pub fn parse_bytes(&self, bytes: &[u8], source_name: impl Into<String>) -> Result<Dataset> {
        let source_name = source_name.into();

        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes, self.config.quote)?,
        };

        let (columns, rows) = self.read_records(bytes, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        };

        tracing::debug!(
            source = %source_name,
            format,
            rows = rows.len(),
            columns = columns.len(),
            "loaded dataset"
        );

        let metadata = DatasetMetadata::new(source_name, bytes.len() as u64, rows.len())
            .with_format(format)
            .with_hash(hash);

        Ok(Dataset::new(columns, rows, metadata))
    }

    /// Read headers and records, inferring a value for every cell.
    fn read_records(&self, bytes: &[u8], delimiter: u8) -> Result<(Vec<String>, Vec<Row>)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let raw_headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            // Generate column names from the widest of the first records
            let width = csv::ReaderBuilder::new()
                .delimiter(delimiter)
                .has_headers(false)
                .quote(self.config.quote)
                .flexible(true)
                .from_reader(bytes)
                .records()
                .take(10)
                .filter_map(|r| r.ok())
                .map(|r| r.len())
                .max()
                .unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        let columns = normalize_headers(&raw_headers);
        if columns.is_empty() {
            return Err(TabwiseError::EmptyData("No columns found".to_string()));
        }

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            // Short records pad with absent cells; extra fields are dropped
            let row: Row = columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let value = record.get(i).map(CellValue::infer).unwrap_or_default();
                    (col.clone(), value)
                })
                .collect();

            rows.push(row);
        }

        Ok((columns, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-case and de-duplicate header names.
///
/// Blank headers get a positional name and repeated names get a numeric
/// suffix (`name`, `name_2`, ...). A header row of only blanks yields no
/// columns.
fn normalize_headers(raw: &[String]) -> Vec<String> {
    if raw.iter().all(|h| h.trim().is_empty()) {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(raw.len());

    for (i, header) in raw.iter().enumerate() {
        let base = match header.trim().to_lowercase() {
            h if h.is_empty() => format!("column_{}", i + 1),
            h => h,
        };

        let mut name = base.clone();
        let mut suffix = 2;
        while !seen.insert(name.clone()) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        columns.push(name);
    }

    columns
}

/// Lines sampled from the top of the input when guessing the delimiter.
const SAMPLE_LINES: usize = 10;

/// How well one candidate delimiter splits the sampled lines.
///
/// Ordered so that the best fit is the greatest: a uniform field count
/// first, then the smallest spread of counts, then the most separators on
/// the header line, with tab winning a remaining tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct DelimiterFit {
    uniform: bool,
    spread: Reverse<usize>,
    header_separators: usize,
    is_tab: bool,
}

impl DelimiterFit {
    /// `None` when the delimiter never appears on the header line.
    fn measure(lines: &[&[u8]], delimiter: u8, quote: u8) -> Option<Self> {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| unquoted_count(line, delimiter, quote))
            .collect();

        let header_separators = *counts.first()?;
        if header_separators == 0 {
            return None;
        }
        let min = counts.iter().copied().min().unwrap_or(0);
        let max = counts.iter().copied().max().unwrap_or(0);

        Some(Self {
            uniform: min == max,
            spread: Reverse(max - min),
            header_separators,
            is_tab: delimiter == b'\t',
        })
    }
}

/// Guess the delimiter from the first non-blank lines.
///
/// Input that none of the candidates splits is read as a single comma
/// separated column.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let lines: Vec<&[u8]> = bytes
        .split(|&b| b == b'\n')
        .filter(|line| !line.trim_ascii().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    if lines.is_empty() {
        return Err(TabwiseError::EmptyData("No lines to analyze".to_string()));
    }

    let best = DELIMITERS
        .iter()
        .filter_map(|&d| DelimiterFit::measure(&lines, d, quote).map(|fit| (fit, d)))
        .max_by_key(|(fit, _)| *fit)
        .map_or(b',', |(_, d)| d);

    tracing::debug!(delimiter = %(best as char).escape_default(), "detected delimiter");
    Ok(best)
}

/// Occurrences of `delimiter` in `line` outside quoted sections.
fn unquoted_count(line: &[u8], delimiter: u8, quote: u8) -> usize {
    line.iter()
        .scan(false, |quoted, &b| {
            if b == quote {
                *quoted = !*quoted;
            }
            Some(b == delimiter && !*quoted)
        })
        .filter(|&hit| hit)
        .count()
}
