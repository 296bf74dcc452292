//! Loading and validating the link mapping.
pub mod mapping;
pub mod toml_loader;
pub mod validation;

use std::path::{Path, PathBuf};

pub use mapping::{DEFAULT_FILE_NAME, LinkGroup, Mapping};

use crate::error::ConfigError;

/// A loaded mapping together with the directory its sources are relative to.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the mapping file that was read.
    pub path: PathBuf,
    /// Canonical directory containing the mapping file.
    pub base_dir: PathBuf,
    /// The parsed mapping.
    pub mapping: Mapping,
}

impl Config {
    /// Load the mapping at `path` and derive the base directory from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not a table
    /// of tables of strings, or if its directory cannot be canonicalised.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mapping: Mapping = toml_loader::load_config(path)?;
        let base_dir = base_dir_of(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            base_dir,
            mapping,
        })
    }

    /// Non-fatal problems found in the mapping.
    #[must_use]
    pub fn validate(&self) -> Vec<validation::ValidationWarning> {
        validation::validate(&self.mapping)
    }
}

/// Canonical parent directory of `path`, treating a bare file name as the
/// current directory.
fn base_dir_of(path: &Path) -> Result<PathBuf, ConfigError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    dunce::canonicalize(parent).map_err(|source| ConfigError::Io {
        path: parent.to_path_buf(),
        source,
    })
}
