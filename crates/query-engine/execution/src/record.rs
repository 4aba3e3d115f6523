//! The error record handed back to callers.

use indexmap::IndexMap;
use serde::Serialize;

/// Request data the caller supplies to make messages friendlier, keyed by field name.
pub type ErrorContext = IndexMap<String, serde_json::Value>;

pub const VALIDATION_ERROR: &str = "validation_error";

/// A failure shaped for the transport layer.
///
/// `http_status` and `error_code` are stable and safe to branch on. `message` is for humans.
/// `detail` is the raw driver text and should stay server side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslatedError {
    pub http_status: u16,
    pub error_code: String,
    pub state_code: String,
    pub message: String,
    pub detail: String,
    pub context: ErrorContext,
}

/// The part of a [`TranslatedError`] that is sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody<'a> {
    pub error_code: &'a str,
    pub message: &'a str,
    pub context: &'a ErrorContext,
}

impl TranslatedError {
    pub fn body(&self) -> ErrorBody<'_> {
        ErrorBody {
            error_code: &self.error_code,
            message: &self.message,
            context: &self.context,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status)
    }

    /// Whether repeating the same statement may succeed.
    pub fn is_retryable(&self) -> bool {
        self.http_status == 503
    }
}

/// Input rejected before any statement ran, as reported by the validation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Messages per field, in the order the fields were checked.
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationFailure {
    pub fn new() -> ValidationFailure {
        ValidationFailure::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// The same record shape database failures use, so callers need one serialization path.
    pub fn into_translated(self, context: ErrorContext) -> TranslatedError {
        let message = self
            .errors
            .values()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_else(|| "The submitted data is invalid.".to_string());
        let detail = self
            .errors
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |message| format!("{field}: {message}"))
            })
            .collect::<Vec<_>>()
            .join("\n");

        TranslatedError {
            http_status: 422,
            error_code: VALIDATION_ERROR.to_string(),
            state_code: String::new(),
            message,
            detail,
            context,
        }
    }
}
