//! Typed error variants for the par-navigator-config crate.
//!
//! `load`/`save` helpers still return `anyhow::Result`; these values are
//! wrapped inside and can be recovered with `downcast_ref::<ConfigError>()`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or saving configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing a config file.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File that was being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file contained YAML that could not be parsed into the target type.
    #[error("YAML parse error in {path:?}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A field value failed semantic validation.
    #[error("Config validation error: {0}")]
    Validation(String),
}
