use std::path::Path;
use std::process::Command;

use crate::error::LedgerError;
use crate::extraction::table::detect_tables;
use crate::extraction::TableDetector;
use crate::model::DataTable;

/// PDF table detection backed by pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` over all pages to preserve the column alignment
/// that table detection relies on.
pub struct PdftotextDetector;

impl PdftotextDetector {
    pub fn new() -> Self {
        PdftotextDetector
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn layout_text(&self, path: &Path) -> Result<String, LedgerError> {
        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LedgerError::PdftotextNotFound
                } else {
                    LedgerError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(LedgerError::PdftotextFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for PdftotextDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDetector for PdftotextDetector {
    fn detect_tables(&self, path: &Path) -> Result<Vec<DataTable>, LedgerError> {
        let text = self.layout_text(path)?;
        Ok(tables_from_layout(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split layout text into pages (form feed separated) and detect tables on each.
pub fn tables_from_layout(text: &str) -> Vec<DataTable> {
    text.split('\x0c')
        .enumerate()
        .flat_map(|(i, page)| {
            let lines: Vec<&str> = page.lines().collect();
            let tables = detect_tables(&lines);
            if !tables.is_empty() {
                tracing::debug!(page = i + 1, tables = tables.len(), "tables on page");
            }
            tables
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_collected_across_pages() {
        let text = "Statement\n\
                    Date      Details        Balance\n\
                    01/03     Opening        1,000.00\n\
                    \x0c\
                    Date      Details        Balance\n\
                    02/03     Rent           400.00\n\
                    03/03     Salary       2,400.00\n";
        let tables = tables_from_layout(text);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[1].rows.len(), 3);
        assert_eq!(tables[1].columns, vec!["0", "1", "2"]);
    }

    #[test]
    fn missing_file_is_reported_as_failure() {
        if !PdftotextDetector::is_available() {
            return;
        }
        let err = PdftotextDetector::new()
            .detect_tables(Path::new("/nonexistent/statement.pdf"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::PdftotextFailed { .. }));
    }
}
