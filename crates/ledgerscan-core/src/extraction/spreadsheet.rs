use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use calamine::{Data, Reader};

use crate::balance::spreadsheet_balance;
use crate::error::LedgerError;
use crate::extraction::TableExtractor;
use crate::model::{DataTable, Extraction};

/// Reads the first sheet of a workbook held in memory.
///
/// The format (xlsx, xlsm, xlsb, xls, ods) is detected from the content, and
/// the first row is taken as the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetExtractor;

impl TableExtractor for SpreadsheetExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Extraction, LedgerError> {
        let table = read_first_sheet(bytes)?;
        let balance = spreadsheet_balance(&table);
        tracing::debug!(
            columns = table.columns.len(),
            rows = table.rows.len(),
            "spreadsheet parsed"
        );
        Ok(Extraction {
            table: Some(table),
            balance,
        })
    }
}

pub fn read_first_sheet(bytes: &[u8]) -> Result<DataTable, LedgerError> {
    let cursor = Cursor::new(bytes);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| LedgerError::Spreadsheet(format!("failed to open workbook: {e}")))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range
            .map_err(|e| LedgerError::Spreadsheet(format!("failed to read first sheet: {e}")))?,
        None => return Ok(DataTable::default()),
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataTable::default());
    };
    let columns = header_names(header);
    let data = rows.map(|row| row.to_vec()).collect();

    Ok(DataTable::new(columns, data))
}

/// Column names from the header row: blank headers become `Unnamed: {i}`
/// and repeats get a `.1`, `.2`, ... suffix, extended until the name is unused.
fn header_names(header: &[Data]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = match cell {
                Data::Empty => format!("Unnamed: {i}"),
                Data::String(s) if s.trim().is_empty() => format!("Unnamed: {i}"),
                Data::String(s) => s.clone(),
                other => other.to_string(),
            };
            let mut name = base.clone();
            while used.contains(&name) {
                let n = suffixes.entry(base.clone()).or_insert(0);
                *n += 1;
                name = format!("{base}.{n}");
            }
            used.insert(name.clone());
            name
        })
        .collect()
}
