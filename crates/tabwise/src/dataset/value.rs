//! Cell values and their canonical textual form.

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

/// Numeric literals recognized at ingestion (best-effort, exponent allowed).
static LOOSE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap()
});

/// Plain decimal literals accepted when committing an edit.
/// `12.0` qualifies, `12.`, `1e3` and `+4` do not.
static STRICT_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(\d+(\.\d+)?|\.\d+)$").unwrap()
});

/// A single cell: a number, a piece of text, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Absent,
}

impl CellValue {
    /// Infer a value from a raw delimited-text field.
    ///
    /// Blank fields become [`CellValue::Absent`], numeric literals become
    /// [`CellValue::Number`], everything else is kept verbatim as text.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Absent;
        }
        if LOOSE_NUMBER.is_match(trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return CellValue::Number(n);
                }
            }
        }
        CellValue::Text(raw.to_string())
    }

    /// Interpret text staged in the cell editor.
    ///
    /// Blank input commits as empty text. Input that is a plain decimal
    /// literal commits as a number; anything else falls back to text.
    pub fn from_edit(staged: &str) -> Self {
        let trimmed = staged.trim();
        if trimmed.is_empty() {
            return CellValue::Text(String::new());
        }
        if STRICT_DECIMAL.is_match(trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                return CellValue::Number(n);
            }
        }
        CellValue::Text(staged.to_string())
    }

    /// True for [`CellValue::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// The native number, if this is a number cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric coercion used by aggregate statistics.
    ///
    /// Numbers pass through; text coerces when its trimmed form parses as
    /// a finite float.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Absent => None,
        }
    }

    /// Canonical textual form: numbers as shortest decimal literals, text
    /// verbatim, absent as the empty string.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Case-insensitive substring test on the canonical form.
    ///
    /// `needle` must already be lower-cased.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            CellValue::Absent => needle.is_empty(),
            CellValue::Text(s) => s.to_lowercase().contains(needle),
            CellValue::Number(_) => self.to_string().to_lowercase().contains(needle),
        }
    }

    /// Ordering of two present values.
    ///
    /// Numbers compare numerically and text by its lower-cased form. A
    /// number orders before any text, whatever the text starts with, so the
    /// ordering stays total when a column mixes both. This differs from
    /// comparing mixed pairs as strings: a `-` placeholder sorts after
    /// `3` and `5` here, where string order would put it first.
    pub(crate) fn cmp_present(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Number(_), _) => Ordering::Less,
            (_, CellValue::Number(_)) => Ordering::Greater,
            _ => self
                .to_string()
                .to_lowercase()
                .cmp(&other.to_string().to_lowercase()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Absent => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Absent)
    }
}
