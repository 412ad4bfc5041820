use calamine::Data;

use crate::model::{DataTable, SanitizedRow};

/// Turn a table into one mapping per row with missing cells replaced by `None`.
///
/// An absent or row-less table yields an empty list.
pub fn sanitize_table(table: Option<&DataTable>) -> Vec<SanitizedRow> {
    let Some(table) = table.filter(|t| !t.is_empty()) else {
        return Vec::new();
    };

    table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .zip(row)
                .map(|(column, cell)| (column.clone(), sanitize_cell(cell)))
                .collect()
        })
        .collect()
}

fn sanitize_cell(cell: &Data) -> Option<Data> {
    if is_missing(cell) {
        return None;
    }
    // Floats can carry NaN without being a missing marker.
    if let Data::Float(f) = cell {
        if f.is_nan() {
            return None;
        }
    }
    Some(cell.clone())
}

fn is_missing(cell: &Data) -> bool {
    matches!(cell, Data::Empty | Data::Error(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    fn table() -> DataTable {
        DataTable::new(
            vec!["Date".into(), "Balance".into()],
            vec![
                vec![Data::String("Jan".into()), Data::Float(f64::NAN)],
                vec![Data::Empty, Data::Error(CellErrorType::Div0)],
                vec![Data::String("Mar".into()), Data::Int(12)],
            ],
        )
    }

    #[test]
    fn absent_and_empty_tables_give_empty_list() {
        assert!(sanitize_table(None).is_empty());
        assert!(sanitize_table(Some(&DataTable::default())).is_empty());
        let header_only = DataTable::new(vec!["Balance".into()], vec![]);
        assert!(sanitize_table(Some(&header_only)).is_empty());
    }

    #[test]
    fn missing_markers_and_nan_become_none() {
        let rows = sanitize_table(Some(&table()));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["Balance"], None);
        assert_eq!(rows[1]["Date"], None);
        assert_eq!(rows[1]["Balance"], None);
        assert_eq!(rows[2]["Balance"], Some(Data::Int(12)));
    }

    #[test]
    fn every_row_has_every_column() {
        for row in sanitize_table(Some(&table())) {
            assert_eq!(row.keys().collect::<Vec<_>>(), vec!["Balance", "Date"]);
        }
    }
}
