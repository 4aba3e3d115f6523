//! Errors that can occur while reading, validating or writing configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid naming convention '{field}': {value:?} may only contain letters, digits and underscores")]
    InvalidConvention { field: &'static str, value: String },

    #[error("the identifier marker must not be empty")]
    EmptyIdentifierMarker,

    #[error("the text and flag prefixes must differ, both are {0:?}")]
    AmbiguousPrefixes(String),

    #[error("maxLimit must be greater than zero")]
    ZeroMaxLimit,
}
