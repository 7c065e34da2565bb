//! Export command handler

use super::open_store;
use logger::{error, info};
use roster::config::Config;
use roster::core::export::write_csv;
use std::path::{Path, PathBuf};

/// Default export file name, matching the web shell's download name
const DEFAULT_EXPORT_NAME: &str = "students_export.csv";

/// Handle `roster export`
pub fn run(config: &Config, output: Option<&Path>) {
    let store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let output_path: PathBuf = output.map_or_else(
        || config.exports_dir_path().join(DEFAULT_EXPORT_NAME),
        Path::to_path_buf,
    );

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("✗ Failed to create exports directory: {e}");
                return;
            }
        }
    }

    match write_csv(store.students(), &output_path) {
        Ok(()) => {
            info!("Exported {} records to {}", store.len(), output_path.display());
            println!("✓ Exported {} records: {}", store.len(), output_path.display());
        }
        Err(e) => {
            error!("CSV export failed: {e}");
            eprintln!("✗ Failed to write {}: {e}", output_path.display());
        }
    }
}
