//! Export of rows in a fixed column order to CSV, TSV, or JSON.
//!
//! Values are written with the same canonical text the engines use for
//! search and display: numbers as numeric literals, absent cells as empty.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dataset::{CellValue, Row};
use crate::error::{Result, TabwiseError};

/// Output format for exported tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        ext.parse().ok()
    }

    /// Field delimiter for the delimited formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
            ExportFormat::Json => None,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" | "tab" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Tsv => write!(f, "tsv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Rows plus the exact column order to write them in.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ExportTable {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Each row as canonical strings in column order.
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .map(|c| row.get(c).to_text())
                .collect()
        })
    }

    /// Write a header line and one line per row.
    pub fn write_delimited<W: Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        out.write_record(&self.columns)?;
        for record in self.records() {
            out.write_record(&record)?;
        }
        out.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Delimited bytes in memory.
    pub fn to_delimited(&self, delimiter: u8) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_delimited(&mut buf, delimiter)?;
        Ok(buf)
    }

    /// Write a JSON array of objects whose keys follow the column order.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let objects: Vec<IndexMap<&str, &CellValue>> = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| (c.as_str(), row.get(c)))
                    .collect()
            })
            .collect();
        serde_json::to_writer_pretty(writer, &objects)?;
        Ok(())
    }

    /// Serialize to bytes in the given format.
    pub fn to_bytes(&self, format: ExportFormat) -> Result<Vec<u8>> {
        match format.delimiter() {
            Some(delimiter) => self.to_delimited(delimiter),
            None => {
                let mut buf = Vec::new();
                self.write_json(&mut buf)?;
                Ok(buf)
            }
        }
    }

    /// Write to a file in the given format.
    pub fn save(&self, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TabwiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);

        match format.delimiter() {
            Some(delimiter) => self.write_delimited(&mut writer, delimiter)?,
            None => self.write_json(&mut writer)?,
        }

        writer.flush().map_err(|e| TabwiseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(
            path = %path.display(),
            %format,
            rows = self.rows.len(),
            "exported table"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExportTable {
        ExportTable::new(
            vec!["name".to_string(), "score".to_string(), "note".to_string()],
            vec![
                Row::new().with("score", 12.0).with("name", "Smith, J"),
                Row::new().with("name", "Doe").with("note", "ok"),
            ],
        )
    }

    #[test]
    fn test_csv_follows_column_order() {
        let bytes = table().to_delimited(b',').unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "name,score,note\n\"Smith, J\",12,\nDoe,,ok\n");
    }

    #[test]
    fn test_tsv() {
        let bytes = table().to_bytes(ExportFormat::Tsv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("name\tscore\tnote\n"));
        assert!(text.contains("\t12\t\n"));
    }

    #[test]
    fn test_json_keeps_order_and_types() {
        let bytes = table().to_bytes(ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value[0]["score"], serde_json::json!(12.0));
        assert!(value[1]["score"].is_null());

        let text = String::from_utf8(bytes).unwrap();
        let name_at = text.find("\"name\"").unwrap();
        let score_at = text.find("\"score\"").unwrap();
        assert!(name_at < score_at);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path("out.TSV"), Some(ExportFormat::Tsv));
        assert_eq!(ExportFormat::from_path("out.xlsx"), None);
    }
}
