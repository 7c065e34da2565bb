//! Command handlers for the `roster` CLI

pub mod config;
pub mod export;
pub mod menu;
pub mod records;
pub mod serve;
pub mod stats;

use roster::config::Config;
use roster::core::store::RecordStore;

/// Open the record store at the configured backing file path.
///
/// Failures are already user-shaped `StoreError` messages; callers print
/// them with a `✗` prefix and return.
pub fn open_store(config: &Config) -> Result<RecordStore, String> {
    let path = config.data_file_path();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("✗ Failed to create {}: {e}", parent.display()))?;
        }
    }
    RecordStore::open(&path).map_err(|e| format!("✗ Failed to open {}: {e}", path.display()))
}
