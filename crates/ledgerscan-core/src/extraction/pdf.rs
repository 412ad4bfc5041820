use std::io::Write;

use crate::balance::pdf_balances;
use crate::error::LedgerError;
use crate::extraction::{TableDetector, TableExtractor};
use crate::model::{BalanceSummary, DataTable, Extraction};

/// PDF path: stages the bytes in a temporary file for the detector.
///
/// Balances are collected from every detected table; the last detected
/// table becomes the output table.
pub struct PdfExtractor<'a> {
    detector: &'a dyn TableDetector,
}

impl<'a> PdfExtractor<'a> {
    pub fn new(detector: &'a dyn TableDetector) -> Self {
        PdfExtractor { detector }
    }

    fn detect(&self, bytes: &[u8]) -> Result<Vec<DataTable>, LedgerError> {
        // Removed when dropped, including when detection fails.
        let mut tmpfile = tempfile::Builder::new()
            .prefix("ledgerscan-")
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| LedgerError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(bytes)
            .and_then(|_| tmpfile.flush())
            .map_err(|e| LedgerError::Extraction(e.to_string()))?;

        self.detector.detect_tables(tmpfile.path())
    }
}

impl TableExtractor for PdfExtractor<'_> {
    fn extract(&self, bytes: &[u8]) -> Result<Extraction, LedgerError> {
        let tables = self.detect(bytes)?;
        tracing::debug!(
            backend = self.detector.backend_name(),
            tables = tables.len(),
            "pdf tables detected"
        );

        let balances: Vec<f64> = tables.iter().flat_map(pdf_balances).collect();

        Ok(Extraction {
            table: tables.into_iter().last(),
            balance: BalanceSummary::from_values(balances),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Records the path it was given and whether the file existed at that time.
    struct RecordingDetector {
        tables: Vec<DataTable>,
        fail: bool,
        seen: Mutex<Option<(PathBuf, Vec<u8>)>>,
    }

    impl RecordingDetector {
        fn new(tables: Vec<DataTable>, fail: bool) -> Self {
            RecordingDetector {
                tables,
                fail,
                seen: Mutex::new(None),
            }
        }

        fn seen_path(&self) -> PathBuf {
            self.seen.lock().unwrap().as_ref().unwrap().0.clone()
        }
    }

    impl TableDetector for RecordingDetector {
        fn detect_tables(&self, path: &Path) -> Result<Vec<DataTable>, LedgerError> {
            let contents = std::fs::read(path)?;
            *self.seen.lock().unwrap() = Some((path.to_path_buf(), contents));
            if self.fail {
                return Err(LedgerError::Extraction("corrupt pdf".into()));
            }
            Ok(self.tables.clone())
        }

        fn backend_name(&self) -> &str {
            "recording"
        }
    }

    fn table(cells: &[&[&str]]) -> DataTable {
        DataTable::positional(
            cells
                .iter()
                .map(|row| row.iter().map(|s| Data::String(s.to_string())).collect())
                .collect(),
        )
    }

    #[test]
    fn temp_file_holds_the_upload_and_is_removed() {
        let detector = RecordingDetector::new(vec![], false);
        PdfExtractor::new(&detector).extract(b"%PDF-1.4 test").unwrap();

        let (path, contents) = detector.seen.lock().unwrap().clone().unwrap();
        assert_eq!(contents, b"%PDF-1.4 test");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert!(!path.exists());
    }

    #[test]
    fn temp_file_is_removed_when_detection_fails() {
        let detector = RecordingDetector::new(vec![], true);
        let err = PdfExtractor::new(&detector).extract(b"%PDF").unwrap_err();
        assert!(matches!(err, LedgerError::Extraction(_)));
        assert!(!detector.seen_path().exists());
    }

    #[test]
    fn balances_span_all_tables_and_last_table_wins() {
        let first = table(&[&["Date", "Balance"], &["01/01", "500.00"]]);
        let second = table(&[&["Ref", "Balance"], &["A1", "$2,000"], &["A2", "75"]]);
        let last = table(&[&["Summary", "Total"], &["Fees", "12"]]);
        let detector = RecordingDetector::new(vec![first, second, last.clone()], false);

        let out = PdfExtractor::new(&detector).extract(b"%PDF").unwrap();
        assert_eq!(out.table, Some(last));
        assert_eq!(out.balance.max, Some(2000.0));
        assert_eq!(out.balance.min, Some(75.0));
    }

    #[test]
    fn no_tables_gives_no_table_and_null_bounds() {
        let detector = RecordingDetector::new(vec![], false);
        let out = PdfExtractor::new(&detector).extract(b"%PDF").unwrap();
        assert_eq!(out, Extraction::default());
    }
}
