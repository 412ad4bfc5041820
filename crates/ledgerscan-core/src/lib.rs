pub mod balance;
pub mod error;
pub mod extraction;
pub mod model;
pub mod normalize;
pub mod sanitize;
pub mod upload;

use std::path::Path;

use error::LedgerError;
use extraction::TableDetector;
use model::{UploadReport, UploadedFile};
use upload::UploadConfig;

pub use upload::process_batch;

/// Read files from disk and run them through the upload pipeline as one batch.
///
/// Each file is named by its final path component, as an upload would be.
pub fn process_paths<P: AsRef<Path>>(
    paths: &[P],
    config: &UploadConfig,
    detector: &dyn TableDetector,
) -> Result<UploadReport, LedgerError> {
    let files = paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let bytes = std::fs::read(path)?;
            Ok(UploadedFile {
                filename: path.file_name().map(|n| n.to_string_lossy().into_owned()),
                bytes,
            })
        })
        .collect::<Result<Vec<_>, LedgerError>>()?;

    process_batch(&files, config, detector)
}
