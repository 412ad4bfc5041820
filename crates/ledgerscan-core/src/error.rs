#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("No files provided")]
    NoFiles,

    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    /// True for errors caused by the request itself rather than by extraction.
    pub fn is_client_error(&self) -> bool {
        matches!(self, LedgerError::NoFiles | LedgerError::InvalidFileType(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_file_type_names_the_file() {
        let err = LedgerError::InvalidFileType("notes.txt".into());
        assert_eq!(err.to_string(), "Invalid file type: notes.txt");
        assert!(err.is_client_error());
    }

    #[test]
    fn extraction_failures_are_server_errors() {
        assert!(!LedgerError::PdftotextNotFound.is_client_error());
        assert!(!LedgerError::Spreadsheet("corrupt".into()).is_client_error());
    }
}
