use ledgerscan_core::error::LedgerError;
use ledgerscan_core::extraction::pdftotext::PdftotextDetector;
use std::sync::Arc;

use crate::server::{self, ServerConfig};

pub fn run(
    host: String,
    port: u16,
    allow_ext: Vec<String>,
    max_upload_mb: usize,
) -> Result<(), LedgerError> {
    let config = ServerConfig {
        host,
        port,
        upload: super::upload_config(allow_ext),
        max_upload_bytes: max_upload_mb * 1024 * 1024,
    };

    if !PdftotextDetector::is_available() {
        tracing::warn!("pdftotext not found; PDF uploads will fail until poppler-utils is installed");
    }
    tracing::info!(
        extensions = ?config.upload.allowed_extensions,
        max_upload_mb,
        "starting upload service"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(config, Arc::new(PdftotextDetector::new())))
}
