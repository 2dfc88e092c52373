// Easy SysInfo - Stream Deck plugin library

// Re-export error types
pub mod error;
pub use error::{PluginError, Result};

// Module declarations
pub mod core;
pub mod deck;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::PluginConfig;

use std::fs::{self, OpenOptions};

/// Initialize logging.
///
/// `level` is the configured filter; `RUST_LOG` overrides it. The Stream Deck
/// application discards plugin stdout/stderr, so output goes to the plugin
/// log file when it can be opened.
pub fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if let Some(file) = open_log_file() {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // Already initialized (tests, embedding) is fine
    let _ = builder.try_init();
}

fn open_log_file() -> Option<fs::File> {
    let path = PluginConfig::log_file_path()?;
    fs::create_dir_all(path.parent()?).ok()?;
    OpenOptions::new().create(true).append(true).open(path).ok()
}
