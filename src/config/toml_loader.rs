//! TOML configuration file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Read and deserialize a TOML file.
///
/// Unlike optional config files, a missing file is an error here: the
/// mapping is the only input the engine has.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if nothing exists at `path`,
/// [`ConfigError::Io`] if it cannot be read, and [`ConfigError::Malformed`]
/// if the content does not deserialize into `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Malformed {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}
