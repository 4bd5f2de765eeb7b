//! Log setup. The terminal belongs to the UI, so logs go to a file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

/// Name of the log file inside the data directory.
const LOG_FILE_NAME: &str = "aeir.log";

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,aeir=debug,aeir_background=debug";

/// Install the global subscriber, returning the log file path.
///
/// Logging is best effort: any failure leaves the app running without it.
pub fn init() -> Option<PathBuf> {
    let dir = aeir_config::project_dirs()?.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok()?;

    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;

    Some(path)
}
