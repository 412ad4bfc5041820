pub mod pdf;
pub mod pdftotext;
pub mod spreadsheet;
pub mod table;

use std::path::Path;

use crate::error::LedgerError;
use crate::model::{DataTable, Extraction};

pub use pdf::PdfExtractor;
pub use spreadsheet::SpreadsheetExtractor;

/// Which extraction path a file takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Spreadsheet,
    Pdf,
}

impl FileKind {
    pub fn from_filename(filename: &str) -> FileKind {
        if filename.to_lowercase().ends_with(".pdf") {
            FileKind::Pdf
        } else {
            FileKind::Spreadsheet
        }
    }
}

/// Common contract of the spreadsheet and PDF paths.
pub trait TableExtractor {
    /// Extract the output table and balance bounds from a file's bytes.
    fn extract(&self, bytes: &[u8]) -> Result<Extraction, LedgerError>;
}

/// Trait for PDF table detection backends.
///
/// Backends read from a filesystem path and scan every page.
pub trait TableDetector: Send + Sync {
    /// Detect all tables in the PDF at `path`, in page order.
    fn detect_tables(&self, path: &Path) -> Result<Vec<DataTable>, LedgerError>;

    /// Name of this detection backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Route a file to the spreadsheet or PDF path by its name.
pub fn extract_file(
    filename: &str,
    bytes: &[u8],
    detector: &dyn TableDetector,
) -> Result<Extraction, LedgerError> {
    match FileKind::from_filename(filename) {
        FileKind::Pdf => PdfExtractor::new(detector).extract(bytes),
        FileKind::Spreadsheet => SpreadsheetExtractor.extract(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_suffix_is_case_insensitive() {
        assert_eq!(FileKind::from_filename("march.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("march.pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("march.xlsx"), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_filename("pdf"), FileKind::Spreadsheet);
    }
}
