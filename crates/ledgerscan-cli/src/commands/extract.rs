use ledgerscan_core::error::LedgerError;
use ledgerscan_core::extraction::pdftotext::PdftotextDetector;
use std::path::PathBuf;

use crate::output;

pub fn run(files: Vec<PathBuf>, output_format: &str, allow_ext: Vec<String>) -> Result<(), LedgerError> {
    let config = super::upload_config(allow_ext);
    let detector = PdftotextDetector::new();
    let report = ledgerscan_core::process_paths(&files, &config, &detector)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print(&report),
    }

    if files.len() > 1 {
        eprintln!(
            "{} file(s) processed; table and balances are from {}",
            report.files.len(),
            report
                .files
                .last()
                .map(|f| f.filename.as_str())
                .unwrap_or("none")
        );
    }

    Ok(())
}
