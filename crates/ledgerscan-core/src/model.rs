use calamine::Data;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One entry of an upload batch, in arrival order.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        UploadedFile {
            filename: Some(filename.into()),
            bytes: bytes.into(),
        }
    }
}

/// Raw rows and columns as produced by the spreadsheet reader or the PDF
/// table detector. Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

impl DataTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Data>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Data::Empty);
                row
            })
            .collect();
        DataTable { columns, rows }
    }

    /// Positional column identifiers `"0"`, `"1"`, ... for tables without a header.
    pub fn positional(rows: Vec<Vec<Data>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let columns = (0..width).map(|i| i.to_string()).collect();
        DataTable::new(columns, rows)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Data> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}

/// A row after sanitization: missing cells are `None`.
pub type SanitizedRow = std::collections::BTreeMap<String, Option<Data>>;

/// A row ready for JSON output.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceSummary {
    pub max: Option<f64>,
    pub min: Option<f64>,
}

impl BalanceSummary {
    /// Max and min over `values`, ignoring NaN. Empty input gives both `None`.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(BalanceSummary::default(), |acc, v| BalanceSummary {
                max: Some(acc.max.map_or(v, |m| m.max(v))),
                min: Some(acc.min.map_or(v, |m| m.min(v))),
            })
    }
}

/// What one file yields: its table (if any) and the balance bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub table: Option<DataTable>,
    pub balance: BalanceSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileState {
    Processed,
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileState::Processed => write!(f, "processed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStatus {
    pub filename: String,
    pub status: FileState,
}

/// Aggregate response for one upload batch. Only the last processed file's
/// table and bounds are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReport {
    pub message: String,
    pub files: Vec<FileStatus>,
    pub table: Vec<Record>,
    pub max_balance: Value,
    pub min_balance: Value,
}
