//! Errors for filter translation.

use thiserror::Error;

/// A filter set the parametrizer refuses to translate.
///
/// Only produced when the configured `order_by` policy is `reject`; every other problem is
/// handled by dropping the offending entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsafe order_by expression {expression:?}: {reason}")]
    UnsafeOrderBy { expression: String, reason: String },
}

impl Error {
    /// Status to answer with; rejected input is the caller's fault.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::UnsafeOrderBy { .. } => 400,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Error::UnsafeOrderBy { .. } => "unsafe_order_by",
        }
    }
}
