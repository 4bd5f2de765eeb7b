//! Configuration file handling for the AEIR flyover.
//!
//! Settings live in `config.toml` under the platform configuration
//! directory. A missing file is not an error: defaults are used instead.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use aeir_core::Config;
use directories::ProjectDirs;
use tracing::{debug, info, warn};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while reading or writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Project directories for the application.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "aeir")
}

/// Default location of the configuration file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    project_dirs()
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load the configuration from its default location, creating it with
/// defaults on first run.
pub fn load() -> Result<Config, ConfigError> {
    load_or_create(&config_path()?)
}

/// Load the configuration from `path`. When the file does not exist yet,
/// defaults are written there so the user has a file to edit.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    let exists = path.try_exists().map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if exists {
        return load_from(path);
    }

    let config = Config::default();
    save_to(&config, path)?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(config)
}

/// Load the configuration from `path`, falling back to defaults when the
/// file does not exist.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the configuration, logging and replacing any error with defaults.
pub fn load_or_default() -> Config {
    match load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Falling back to default configuration");
            Config::default()
        }
    }
}

/// Write the configuration to `path`, creating parent directories.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let text = toml::to_string_pretty(config)?;
    fs::write(path, text).map_err(io_err)
}
