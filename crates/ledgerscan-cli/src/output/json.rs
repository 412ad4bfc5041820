use ledgerscan_core::error::LedgerError;
use ledgerscan_core::model::UploadReport;

pub fn print(report: &UploadReport) -> Result<(), LedgerError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
