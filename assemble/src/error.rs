//! Error types for loading, merging and writing documents.
//!
//! Wraps codec failures from the core crate together with I/O and
//! configuration problems.

use std::path::PathBuf;

use swagger_model_core::DocumentError;
use thiserror::Error;

/// Errors that can occur while assembling documents.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A document or bundle could not be decoded or encoded.
    #[error("document error: {0}")]
    DocumentError(#[from] DocumentError),

    /// The YAML configuration file could not be parsed or written.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Configuration is structurally valid YAML but unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The file extension does not map to a known format.
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A bundle directory contains no definition files.
    #[error("no definition files found in {}", .0.display())]
    NoDefinitionFiles(PathBuf),
}

/// Convenience alias for results with [`AssembleError`].
pub type Result<T> = std::result::Result<T, AssembleError>;
