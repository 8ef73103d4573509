//! Error types for the scanner core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the caller.
///
/// Missing per-package files never show up here: the license detector treats
/// them as normal fall-through. Only lock-file level failures are fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// None of the known lock files exist under the project root.
    #[error("no lock file found in {}", .0.display())]
    LockFileNotFound(PathBuf),

    /// The lock file exists but could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed `package-lock.json`.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed `pnpm-lock.yaml`.
    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Malformed policy file.
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for malformed lock-file content, as opposed to missing or unreadable files.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Json { .. } | Error::Yaml { .. })
    }
}
