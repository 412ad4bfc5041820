//! Locating the balance column and computing its bounds.
//!
//! Spreadsheets have reliable headers, so the column is matched by name.
//! PDF table detection often pushes the header into the data rows, so for
//! PDFs the column is matched by cell content instead.

use std::sync::LazyLock;

use calamine::Data;
use regex::Regex;

use crate::model::{BalanceSummary, DataTable};

const BALANCE: &str = "balance";

static NON_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d.]").unwrap());

fn is_balance_label(s: &str) -> bool {
    s.trim().to_lowercase() == BALANCE
}

/// Index of the first column whose header reads "balance".
pub fn find_header_column(table: &DataTable) -> Option<usize> {
    table.columns.iter().position(|c| is_balance_label(c))
}

/// Index of the first column containing a cell that reads "balance".
pub fn find_content_column(table: &DataTable) -> Option<usize> {
    (0..table.columns.len()).find(|&i| table.column(i).any(|cell| is_balance_label(&cell_text(cell))))
}

/// Bounds of the spreadsheet balance column; unparseable cells are ignored.
pub fn spreadsheet_balance(table: &DataTable) -> BalanceSummary {
    let Some(index) = find_header_column(table) else {
        return BalanceSummary::default();
    };
    tracing::debug!(column = %table.columns[index], "balance column found by header");
    BalanceSummary::from_values(table.column(index).filter_map(coerce_numeric))
}

/// Numeric values of the PDF balance column, after stripping currency
/// symbols, separators and any other non-numeric characters.
pub fn pdf_balances(table: &DataTable) -> Vec<f64> {
    let Some(index) = find_content_column(table) else {
        return Vec::new();
    };
    tracing::debug!(column = index, "balance column found by content");

    table
        .column(index)
        .filter_map(|cell| {
            let text = cell_text(cell).trim().to_lowercase();
            if text == BALANCE {
                return None;
            }
            let cleaned = NON_NUMERIC.replace_all(&text, "");
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok()
        })
        .collect()
}

/// Numeric coercion of a spreadsheet cell; `None` when it has no numeric reading.
fn coerce_numeric(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.into())
    }

    #[test]
    fn header_match_trims_and_ignores_case() {
        let t = DataTable::new(
            vec!["Date".into(), "  BALANCE ".into(), "Balance".into()],
            vec![],
        );
        assert_eq!(find_header_column(&t), Some(1));
    }

    #[test]
    fn spreadsheet_bounds_skip_unparseable_cells() {
        let t = DataTable::new(
            vec!["Date".into(), "Balance".into()],
            vec![
                vec![text("a"), Data::Float(100.25)],
                vec![text("b"), text("n/a")],
                vec![text("c"), Data::Int(-40)],
                vec![text("d"), text(" 512 ")],
                vec![text("e"), Data::Empty],
                vec![text("f"), Data::Float(f64::NAN)],
            ],
        );
        let s = spreadsheet_balance(&t);
        assert_eq!(s.max, Some(512.0));
        assert_eq!(s.min, Some(-40.0));
    }

    #[test]
    fn spreadsheet_without_balance_column_is_null() {
        let t = DataTable::new(
            vec!["Amount".into()],
            vec![vec![Data::Float(3.0)]],
        );
        assert_eq!(spreadsheet_balance(&t), BalanceSummary::default());
    }

    #[test]
    fn spreadsheet_balance_column_with_no_numbers_is_null() {
        let t = DataTable::new(vec!["balance".into()], vec![vec![text("pending")]]);
        assert_eq!(spreadsheet_balance(&t), BalanceSummary::default());
    }

    #[test]
    fn pdf_column_found_by_content() {
        let t = DataTable::positional(vec![
            vec![text("Date"), text("Details"), text("Balance")],
            vec![text("01/02"), text("Opening"), text("$1,200.50")],
            vec![text("02/02"), text("Fee"), text("abc")],
            vec![text("03/02"), text("Card"), text("950")],
        ]);
        assert_eq!(find_content_column(&t), Some(2));
        let values = pdf_balances(&t);
        assert_eq!(values, vec![1200.50, 950.0]);
        let s = BalanceSummary::from_values(values);
        assert_eq!(s.max, Some(1200.50));
        assert_eq!(s.min, Some(950.0));
    }

    #[test]
    fn pdf_values_that_do_not_parse_are_skipped() {
        let t = DataTable::positional(vec![
            vec![text("balance")],
            vec![text("1.2.3")],
            vec![text("--")],
            vec![text("7.")],
        ]);
        assert_eq!(pdf_balances(&t), vec![7.0]);
    }

    #[test]
    fn pdf_without_balance_cell_yields_nothing() {
        let t = DataTable::positional(vec![vec![text("Total"), text("12")]]);
        assert!(pdf_balances(&t).is_empty());
    }
}
