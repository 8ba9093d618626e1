//! Errors from config and body-record file I/O.

use std::path::{Path, PathBuf};

/// A config or record file could not be read, parsed, or written.
///
/// Every variant names the file involved.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize RON for {}: {source}", path.display())]
    SerializeError {
        path: PathBuf,
        #[source]
        source: ron::Error,
    },
}

impl ConfigError {
    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadError { path, .. }
            | Self::WriteError { path, .. }
            | Self::ParseError { path, .. }
            | Self::SerializeError { path, .. } => path,
        }
    }
}

/// Read a file, tagging failures with its path.
pub(crate) fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse RON text read from `path`.
pub(crate) fn parse<T: serde::de::DeserializeOwned>(
    path: &Path,
    contents: &str,
) -> Result<T, ConfigError> {
    ron::from_str(contents).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError + '_ {
    move |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    }
}
