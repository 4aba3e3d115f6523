//! Translate database failures into [`TranslatedError`] records.
//!
//! The status and error code come from the SQLSTATE alone. The message is
//! refined from the detail text and the caller's context. Translation runs on
//! an already failed request, so it never fails, logs or performs I/O.

use query_engine_metadata::metadata::{classify_state, NamingConventions, SqlState};
use serde_json::Value;

use crate::extract::{self, Extractor, KeyPair};
use crate::failure::DriverFailure;
use crate::record::{ErrorContext, TranslatedError};

/// Raw values longer than this are shortened in messages.
const MAX_DISPLAY_CHARS: usize = 50;
const ELLIPSIS: &str = "...";

const GENERIC_MESSAGE: &str = "Database error.";
const RETRY_WITH_ANOTHER_VALUE: &str = "Check the data and try another value.";
const FOREIGN_KEY_FALLBACK: &str =
    "Invalid reference: a foreign key points to a record that does not exist. Check the referenced data.";

/// What a unique violation reports, most specific first.
enum Duplicate {
    Pairs(Vec<KeyPair>),
    Constraint(String),
}

const DUPLICATE_EXTRACTORS: [Extractor<Duplicate>; 2] = [duplicate_pairs, duplicate_constraint];

fn duplicate_pairs(detail: &str) -> Option<Duplicate> {
    extract::key_pairs(detail).map(Duplicate::Pairs)
}

fn duplicate_constraint(detail: &str) -> Option<Duplicate> {
    extract::unique_constraint(detail).map(Duplicate::Constraint)
}

const NULL_COLUMN_EXTRACTORS: [Extractor<String>; 3] = [
    extract::null_value_column,
    extract::any_column,
    extract::first_key_column,
];

const MISSING_COLUMN_EXTRACTORS: [Extractor<String>; 2] =
    [extract::missing_column, extract::any_column];

/// Translate with the default naming conventions.
pub fn translate(failure: &DriverFailure, context: &ErrorContext) -> TranslatedError {
    Translator::default().translate(failure, context)
}

#[derive(Debug, Clone, Default)]
pub struct Translator {
    conventions: NamingConventions,
}

impl Translator {
    pub fn new(conventions: NamingConventions) -> Translator {
        Translator { conventions }
    }

    pub fn translate(&self, failure: &DriverFailure, context: &ErrorContext) -> TranslatedError {
        let classification = classify_state(&failure.state_code);
        let detail = failure.detail_text.as_str();

        let message = match classification.state {
            Some(SqlState::ForeignKeyViolation) => foreign_key_message(detail),
            Some(SqlState::UniqueViolation) => self.unique_message(detail, context),
            Some(SqlState::NotNullViolation) => not_null_message(detail),
            Some(SqlState::StringDataRightTruncation) => truncation_message(detail),
            Some(SqlState::SerializationFailure | SqlState::DeadlockDetected) => {
                "A concurrent change was detected. Please try again.".to_string()
            }
            Some(SqlState::SyntaxError) => syntax_message(detail),
            Some(SqlState::UndefinedColumn) => undefined_column_message(detail),
            Some(SqlState::InvalidTextRepresentation) => invalid_text_message(detail, context),
            None => GENERIC_MESSAGE.to_string(),
        };

        TranslatedError {
            http_status: classification.http_status,
            error_code: classification.error_code,
            state_code: failure.state_code.clone(),
            message,
            detail: failure.detail_text.clone(),
            context: context.clone(),
        }
    }

    fn unique_message(&self, detail: &str, context: &ErrorContext) -> String {
        match extract::first_match(&DUPLICATE_EXTRACTORS, detail) {
            Some(Duplicate::Pairs(pairs)) => {
                let described = pairs
                    .iter()
                    .map(|pair| self.describe_pair(pair, context))
                    .collect::<Vec<_>>()
                    .join(", ");
                if pairs.len() == 1 {
                    format!("A record with {described} already exists. {RETRY_WITH_ANOTHER_VALUE}")
                } else {
                    format!("A record with the same values for ({described}) already exists.")
                }
            }
            Some(Duplicate::Constraint(constraint)) => format!(
                "Uniqueness violated for constraint \"{constraint}\". {RETRY_WITH_ANOTHER_VALUE}"
            ),
            None => format!(
                "A record with duplicate values already exists. {RETRY_WITH_ANOTHER_VALUE}"
            ),
        }
    }

    /// `column = value`, preferring the value the caller sent over the one the server printed.
    fn describe_pair(&self, pair: &KeyPair, context: &ErrorContext) -> String {
        let shown = self
            .context_value(&pair.column, context)
            .and_then(display_context_value)
            .or_else(|| pair.value.as_deref().map(shorten));
        match shown {
            Some(value) => format!("{} = {value}", pair.column),
            None => pair.column.clone(),
        }
    }

    /// Probe the context for a column: the exact name, without the text prefix, lowercased,
    /// and finally by its leading word.
    fn context_value<'a>(&self, column: &str, context: &'a ErrorContext) -> Option<&'a Value> {
        let column = column.trim_matches('"');
        let lowercase = column.to_lowercase();
        let probes = [
            column,
            self.conventions.strip_text_prefix(column),
            lowercase.as_str(),
            self.conventions.semantic_stem(column),
        ];
        for probe in probes {
            if probe.is_empty() {
                continue;
            }
            if let Some(value) = context.get(probe) {
                return Some(value);
            }
        }
        None
    }
}

/// Text for a context value. Null and empty strings count as absent; emails are quoted.
fn display_context_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) if text.contains('@') => Some(format!("\"{text}\"")),
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn shorten(raw: &str) -> String {
    if raw.chars().count() > MAX_DISPLAY_CHARS {
        let kept: String = raw
            .chars()
            .take(MAX_DISPLAY_CHARS - ELLIPSIS.len())
            .collect();
        format!("{kept}{ELLIPSIS}")
    } else {
        raw.to_string()
    }
}

fn foreign_key_message(detail: &str) -> String {
    let first = extract::key_pairs(detail).and_then(|pairs| pairs.into_iter().next());
    match first {
        Some(KeyPair {
            column,
            value: Some(value),
        }) => format!(
            "Invalid reference: the record given in {column} ({value}) does not exist. \
             Create it before continuing."
        ),
        _ => FOREIGN_KEY_FALLBACK.to_string(),
    }
}

fn not_null_message(detail: &str) -> String {
    match extract::first_match(&NULL_COLUMN_EXTRACTORS, detail) {
        Some(column) => {
            format!("Missing required field: {column}. Fill in this field and try again.")
        }
        None => "A required field is missing. Check the submitted data and try again.".to_string(),
    }
}

fn truncation_message(detail: &str) -> String {
    match extract::first_key_column(detail) {
        Some(column) => format!(
            "The value sent for {column} exceeds the allowed size. Shorten the field."
        ),
        None => {
            "One of the values sent exceeds the allowed size. Check the fields and shorten them."
                .to_string()
        }
    }
}

fn syntax_message(detail: &str) -> String {
    let near = extract::syntax_near(detail).map(|token| token.to_ascii_lowercase());
    match near.as_deref() {
        Some("order" | "by") => {
            "Invalid ordering. Check the order_by parameter and use column names with ASC or DESC."
                .to_string()
        }
        Some("limit") => "Invalid limit. It must be a non-negative integer.".to_string(),
        Some("offset") => "Invalid offset. It must be a non-negative integer.".to_string(),
        _ => "The query could not be understood by the database. Check the filters sent."
            .to_string(),
    }
}

fn undefined_column_message(detail: &str) -> String {
    let Some(column) = extract::first_match(&MISSING_COLUMN_EXTRACTORS, detail) else {
        return "The query references a column that does not exist.".to_string();
    };
    match extract::query_line(detail) {
        Some((line, text)) => {
            format!("The column {column} does not exist (line {line}: {text}).")
        }
        None => format!("The column {column} does not exist."),
    }
}

fn invalid_text_message(detail: &str, context: &ErrorContext) -> String {
    let Some((target_type, literal)) = extract::invalid_text(detail) else {
        return "One of the values sent has an invalid format.".to_string();
    };
    let field = context.iter().find_map(|(field, value)| {
        let text = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        (text == literal).then_some(field)
    });
    match field {
        Some(field) => {
            format!("The value \"{literal}\" sent for {field} is not a valid {target_type}.")
        }
        None => format!("The value \"{literal}\" is not a valid {target_type}."),
    }
}
