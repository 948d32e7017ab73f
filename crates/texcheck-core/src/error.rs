//! Error types for texcheck-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that stop a run before a document can be checked.
///
/// Both variants are fatal: the run halts at the first failing path.
#[derive(Error, Debug)]
pub enum InputError {
    /// The path does not name a TeX file.
    #[error("need to supply a TeX file as a command-line argument (got {path})")]
    NotTex {
        /// The offending path.
        path: Utf8PathBuf,
    },

    /// The file could not be read.
    #[error("cannot read {path}")]
    Unreadable {
        /// The path that failed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`InputError`].
pub type InputResult<T> = Result<T, InputError>;
