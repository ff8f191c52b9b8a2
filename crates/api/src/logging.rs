//! Tracing subscriber setup.
//!
//! Console output is pretty or JSON depending on `LOG_FORMAT`. When
//! `LOG_FILE` is set, every event is also appended to that file as plain
//! text.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, ServerConfig};

const DEFAULT_FILTER: &str = "tourbook_api=debug,tourbook_db=debug,tower_http=debug";

/// Install the global subscriber.
///
/// Panics if the log file cannot be opened; misconfiguration should fail
/// fast.
pub fn init(config: &ServerConfig) {
    let json = config.log_format == LogFormat::Json;
    let file = config.log_file.as_deref().map(|path| {
        open_log_file(path)
            .unwrap_or_else(|e| panic!("Failed to open log file '{}': {e}", path.display()))
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .with(file.map(file_layer))
        .init();
}

/// Open `path` for appending, creating it and its parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Plain-text formatting layer writing to `file`.
pub fn file_layer<S>(file: File) -> fmt::Layer<S, DefaultFields, Format, File> {
    fmt::layer().with_ansi(false).with_writer(file)
}
