//! Error types for helm-smells.
//!
//! Checks never produce these: anything a check can anticipate is reported
//! as a failed [`Finding`](crate::analyzer::smells::Finding). These errors
//! cover the surrounding machinery (chart discovery, configuration, git).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while analyzing charts or their history.
#[derive(Debug, Error)]
pub enum SmellError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The chart root (or workspace) does not exist
    #[error("Path does not exist: {0}")]
    MissingPath(PathBuf),

    /// The chart root (or workspace) is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A YAML document could not be parsed
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration file is invalid
    #[error("Invalid configuration in {path}: {message}")]
    Config {
        /// Configuration file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A report could not be serialized
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A git command exited unsuccessfully
    #[error("git {command} failed: {stderr}")]
    Git {
        /// The git arguments that were run
        command: String,
        /// Captured standard error
        stderr: String,
    },

    /// A date printed by git could not be parsed
    #[error("Unparseable commit date '{0}'")]
    InvalidDate(String),

    /// A command line or configuration value is unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SmellError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for helm-smells operations
pub type Result<T> = std::result::Result<T, SmellError>;
