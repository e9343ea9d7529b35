//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabwise::ExportFormat;

/// Tabwise: explore, edit, and compare delimited datasets
#[derive(Parser)]
#[command(name = "tabwise")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file (parser, view, and compare settings)
    #[arg(long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of a data file
    View {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Case-insensitive search across all columns
        #[arg(short, long)]
        search: Option<String>,

        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page (default: from the configuration, 50)
        #[arg(long)]
        page_size: Option<usize>,

        /// Show every matching row instead of one page
        #[arg(long, conflicts_with_all = ["page", "page_size"])]
        all: bool,

        /// Select a cell range on the shown rows, e.g. 0:1-4:2
        #[arg(long, value_name = "RANGE", conflicts_with = "column")]
        select: Option<CellRange>,

        /// Select a whole column of the shown rows for statistics
        #[arg(short, long)]
        column: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the columns two files share (candidate join keys)
    Keys {
        /// Left data file
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        /// Right data file
        #[arg(value_name = "RIGHT")]
        right: PathBuf,
    },

    /// Compare two files on a shared key column
    Compare {
        /// Left data file
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        /// Right data file
        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        /// Join key (default: first shared column)
        #[arg(short, long)]
        key: Option<String>,

        /// Which rows to list after the summary
        #[arg(long, default_value = "none")]
        show: Bucket,

        /// Print the field diff of the Nth matched row (0-based)
        #[arg(long, value_name = "N")]
        diff: Option<usize>,

        /// Label for columns from the left file
        #[arg(long)]
        left_label: Option<String>,

        /// Label for columns from the right file
        #[arg(long)]
        right_label: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a filtered/sorted view or a comparison bucket
    Export {
        /// Path to the data file (the left file when comparing)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (default: from the output extension, else csv)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Case-insensitive search across all columns
        #[arg(short, long)]
        search: Option<String>,

        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Compare against this file and export a bucket instead
        #[arg(long, value_name = "RIGHT")]
        against: Option<PathBuf>,

        /// Join key when comparing
        #[arg(short, long, requires = "against")]
        key: Option<String>,

        /// Bucket to export when comparing
        #[arg(long, default_value = "matches")]
        bucket: Bucket,
    },
}

/// A comparison row set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Bucket {
    #[default]
    None,
    Matches,
    Left,
    Right,
    All,
}

impl std::str::FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Bucket::None),
            "matches" | "matched" | "both" => Ok(Bucket::Matches),
            "left" | "left-only" => Ok(Bucket::Left),
            "right" | "right-only" => Ok(Bucket::Right),
            "all" => Ok(Bucket::All),
            _ => Err(format!(
                "Unknown bucket: {}. Use: none, matches, left, right, or all.",
                s
            )),
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::None => write!(f, "none"),
            Bucket::Matches => write!(f, "matches"),
            Bucket::Left => write!(f, "left"),
            Bucket::Right => write!(f, "right"),
            Bucket::All => write!(f, "all"),
        }
    }
}

/// A rectangle of displayed cells written `ROW:COL-ROW:COL`.
///
/// A single `ROW:COL` selects one cell; `ROW:*` selects a whole row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub start: (usize, Option<usize>),
    pub end: (usize, Option<usize>),
}

fn parse_point(s: &str) -> Result<(usize, Option<usize>), String> {
    let (row, col) = s
        .split_once(':')
        .ok_or_else(|| format!("Expected ROW:COL, got '{}'", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row '{}'", row))?;
    let col = match col.trim() {
        "*" => None,
        c => Some(c.parse().map_err(|_| format!("Invalid column '{}'", c))?),
    };
    Ok((row, col))
}

impl std::str::FromStr for CellRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((a, b)) => Ok(CellRange {
                start: parse_point(a)?,
                end: parse_point(b)?,
            }),
            None => {
                let point = parse_point(s)?;
                Ok(CellRange {
                    start: point,
                    end: point,
                })
            }
        }
    }
}
