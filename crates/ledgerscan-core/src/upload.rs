use crate::error::LedgerError;
use crate::extraction::{extract_file, TableDetector};
use crate::model::{Extraction, FileState, FileStatus, UploadReport, UploadedFile};
use crate::normalize::{normalize_bound, normalize_rows};
use crate::sanitize::sanitize_table;

pub const SUCCESS_MESSAGE: &str = "Files processed successfully";

pub const DEFAULT_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods", "pdf"];

/// Upload rules shared by the HTTP and CLI front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Lowercase extensions without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UploadConfig {
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        UploadConfig {
            allowed_extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// True when `filename` has an extension on the allow-list.
    pub fn is_allowed(&self, filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .is_some_and(|ext| self.allowed_extensions.contains(&ext))
    }
}

/// Process an upload batch in arrival order.
///
/// Entries without a filename are skipped. The first disallowed extension
/// aborts the whole batch. Every accepted file is extracted, but only the
/// last one's table and balance bounds are reported; earlier results are
/// overwritten, not merged.
pub fn process_batch(
    files: &[UploadedFile],
    config: &UploadConfig,
    detector: &dyn TableDetector,
) -> Result<UploadReport, LedgerError> {
    let mut statuses = Vec::new();
    let mut latest = Extraction::default();

    for file in files {
        let Some(filename) = file.filename.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };

        if !config.is_allowed(filename) {
            tracing::warn!(filename, "rejected upload batch: file type not allowed");
            return Err(LedgerError::InvalidFileType(filename.to_string()));
        }

        statuses.push(FileStatus {
            filename: filename.to_string(),
            status: FileState::Processed,
        });

        latest = extract_file(filename, &file.bytes, detector)?;
        tracing::info!(
            filename,
            rows = latest.table.as_ref().map_or(0, |t| t.rows.len()),
            max = ?latest.balance.max,
            min = ?latest.balance.min,
            "file processed"
        );
    }

    let rows = sanitize_table(latest.table.as_ref());
    Ok(UploadReport {
        message: SUCCESS_MESSAGE.to_string(),
        files: statuses,
        table: normalize_rows(&rows),
        max_balance: normalize_bound(latest.balance.max),
        min_balance: normalize_bound(latest.balance.min),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allow_list_covers_spreadsheets_and_pdf() {
        let config = UploadConfig::default();
        assert!(config.is_allowed("statement.pdf"));
        assert!(config.is_allowed("statement.XLSX"));
        assert!(config.is_allowed("archive.2023.xls"));
        assert!(!config.is_allowed("notes.txt"));
        assert!(!config.is_allowed("xlsx"));
        assert!(!config.is_allowed("statement."));
    }

    #[test]
    fn custom_extensions_are_normalized() {
        let config = UploadConfig::with_extensions([".PDF", " csv ", ""]);
        assert_eq!(config.allowed_extensions, vec!["pdf", "csv"]);
        assert!(config.is_allowed("a.csv"));
        assert!(!config.is_allowed("a.xlsx"));
    }
}
