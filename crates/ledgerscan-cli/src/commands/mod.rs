pub mod extract;
pub mod serve;

use ledgerscan_core::upload::UploadConfig;

/// The default allow-list, or the user's list when one was given.
fn upload_config(allow_ext: Vec<String>) -> UploadConfig {
    if allow_ext.is_empty() {
        UploadConfig::default()
    } else {
        UploadConfig::with_extensions(allow_ext)
    }
}
