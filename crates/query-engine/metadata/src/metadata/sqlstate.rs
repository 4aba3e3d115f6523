//! The SQLSTATE taxonomy: which database failures we recognise and the stable
//! `(http status, error code)` pair each of them maps to.
//!
//! The pair depends on the state code alone. Anything that varies with the
//! failure's detail text or the caller's context belongs in the message.

use enum_iterator::Sequence;

/// Error code used when the driver did not report a state code at all.
pub const INTERNAL_DATABASE_ERROR: &str = "internal_database_error";

/// The SQLSTATE codes with a dedicated row in the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence)]
pub enum SqlState {
    ForeignKeyViolation,
    UniqueViolation,
    NotNullViolation,
    StringDataRightTruncation,
    SerializationFailure,
    DeadlockDetected,
    SyntaxError,
    UndefinedColumn,
    InvalidTextRepresentation,
}

impl SqlState {
    /// The five character SQLSTATE as reported by Postgres.
    pub fn code(self) -> &'static str {
        match self {
            SqlState::ForeignKeyViolation => "23503",
            SqlState::UniqueViolation => "23505",
            SqlState::NotNullViolation => "23502",
            SqlState::StringDataRightTruncation => "22001",
            SqlState::SerializationFailure => "40001",
            SqlState::DeadlockDetected => "40P01",
            SqlState::SyntaxError => "42601",
            SqlState::UndefinedColumn => "42703",
            SqlState::InvalidTextRepresentation => "22P02",
        }
    }

    pub fn from_code(code: &str) -> Option<SqlState> {
        let code = code.trim();
        enum_iterator::all::<SqlState>().find(|state| state.code().eq_ignore_ascii_case(code))
    }

    pub fn http_status(self) -> u16 {
        match self {
            SqlState::ForeignKeyViolation
            | SqlState::NotNullViolation
            | SqlState::StringDataRightTruncation
            | SqlState::InvalidTextRepresentation => 422,
            SqlState::UniqueViolation => 409,
            SqlState::SerializationFailure | SqlState::DeadlockDetected => 503,
            SqlState::SyntaxError => 400,
            SqlState::UndefinedColumn => 500,
        }
    }

    /// The machine token clients are allowed to branch on.
    pub fn error_code(self) -> &'static str {
        match self {
            SqlState::ForeignKeyViolation => "foreign_key_violation",
            SqlState::UniqueViolation => "unique_violation",
            SqlState::NotNullViolation => "not_null_violation",
            SqlState::StringDataRightTruncation => "string_truncation",
            SqlState::SerializationFailure | SqlState::DeadlockDetected => "concurrency_failure",
            SqlState::SyntaxError => "syntax_error",
            SqlState::UndefinedColumn => "undefined_column",
            SqlState::InvalidTextRepresentation => "invalid_text_representation",
        }
    }
}

/// The stable part of a translated failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub http_status: u16,
    pub error_code: String,
    pub state: Option<SqlState>,
}

/// Look a state code up in the taxonomy.
///
/// Unknown codes keep their own code as the error code and map to 500; an empty code maps to
/// [`INTERNAL_DATABASE_ERROR`].
pub fn classify_state(code: &str) -> Classification {
    match SqlState::from_code(code) {
        Some(state) => Classification {
            http_status: state.http_status(),
            error_code: state.error_code().to_string(),
            state: Some(state),
        },
        None => Classification {
            http_status: 500,
            error_code: if code.trim().is_empty() {
                INTERNAL_DATABASE_ERROR.to_string()
            } else {
                code.trim().to_string()
            },
            state: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_round_trips_through_its_code() {
        for state in enum_iterator::all::<SqlState>() {
            assert_eq!(SqlState::from_code(state.code()), Some(state));
        }
    }

    #[test]
    fn table_rows() {
        let rows: Vec<(&str, u16, &str)> = enum_iterator::all::<SqlState>()
            .map(|state| (state.code(), state.http_status(), state.error_code()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("23503", 422, "foreign_key_violation"),
                ("23505", 409, "unique_violation"),
                ("23502", 422, "not_null_violation"),
                ("22001", 422, "string_truncation"),
                ("40001", 503, "concurrency_failure"),
                ("40P01", 503, "concurrency_failure"),
                ("42601", 400, "syntax_error"),
                ("42703", 500, "undefined_column"),
                ("22P02", 422, "invalid_text_representation"),
            ]
        );
    }

    #[test]
    fn state_codes_are_case_insensitive() {
        assert_eq!(SqlState::from_code("40p01"), Some(SqlState::DeadlockDetected));
        assert_eq!(SqlState::from_code(" 23505 "), Some(SqlState::UniqueViolation));
    }

    #[test]
    fn unknown_codes_fall_through_to_500() {
        let classification = classify_state("08006");
        assert_eq!(classification.http_status, 500);
        assert_eq!(classification.error_code, "08006");
        assert_eq!(classification.state, None);
    }

    #[test]
    fn empty_code_is_an_internal_database_error() {
        let classification = classify_state("");
        assert_eq!(classification.http_status, 500);
        assert_eq!(classification.error_code, INTERNAL_DATABASE_ERROR);
    }
}
