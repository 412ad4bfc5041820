//! Table reconstruction from pdftotext -layout output.
//!
//! pdftotext -layout preserves column alignment using spaces. A table is a
//! run of lines with at least two space-separated fields, and its columns
//! are the character spans that stay separated by blank gaps on every line.

use std::sync::LazyLock;

use calamine::Data;
use regex::Regex;

use crate::model::DataTable;

/// Minimum run of blanks that separates two fields or two columns.
const MIN_GAP: usize = 2;

static FIELD_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRegion {
    pub start_line: usize,
    pub end_line: usize,
}

/// Detect if a line looks like a table row.
pub fn is_table_line(line: &str) -> bool {
    FIELD_GAP
        .split(line.trim())
        .filter(|f| !f.is_empty())
        .count()
        >= 2
}

/// Find the table regions within one page. Blank lines do not end a region;
/// any other non-table line does.
pub fn find_table_regions(lines: &[&str]) -> Vec<TableRegion> {
    let mut regions = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;

    let close = |start: usize, end: usize, regions: &mut Vec<TableRegion>| {
        let rows = lines[start..end]
            .iter()
            .filter(|l| !l.trim().is_empty())
            .count();
        if rows >= 2 {
            regions.push(TableRegion {
                start_line: start,
                end_line: end,
            });
        }
    };

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if is_table_line(line) {
            start.get_or_insert(i);
            end = i + 1;
        } else if let Some(s) = start.take() {
            close(s, end, &mut regions);
        }
    }
    if let Some(s) = start {
        close(s, end, &mut regions);
    }

    regions
}

/// Character spans `[start, end)` of the columns shared by `lines`.
fn column_spans(lines: &[Vec<char>]) -> Vec<(usize, usize)> {
    let width = lines.iter().map(Vec::len).max().unwrap_or(0);
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut gap = 0;

    for pos in 0..width {
        let occupied = lines
            .iter()
            .any(|l| l.get(pos).is_some_and(|c| !c.is_whitespace()));
        if occupied {
            start.get_or_insert(pos);
            end = pos + 1;
            gap = 0;
        } else if let Some(s) = start {
            gap += 1;
            if gap >= MIN_GAP {
                spans.push((s, end));
                start = None;
            }
        }
    }
    if let Some(s) = start {
        spans.push((s, end));
    }

    spans
}

/// Split the lines of one region into a table with positional columns.
pub fn region_to_table(lines: &[&str]) -> DataTable {
    let chars: Vec<Vec<char>> = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().collect())
        .collect();
    let spans = column_spans(&chars);

    let rows = chars
        .iter()
        .map(|line| {
            spans
                .iter()
                .map(|&(s, e)| {
                    let cell: String = line
                        .get(s..e.min(line.len()))
                        .unwrap_or_default()
                        .iter()
                        .collect();
                    Data::String(cell.trim().to_string())
                })
                .collect()
        })
        .collect();

    DataTable::positional(rows)
}

/// Detect every table on one page, top to bottom.
pub fn detect_tables(lines: &[&str]) -> Vec<DataTable> {
    find_table_regions(lines)
        .into_iter()
        .map(|r| region_to_table(&lines[r.start_line..r.end_line]))
        .collect()
}
