//! The failure report a statement execution produces.

use std::borrow::Cow;

use sqlx::postgres::PgDatabaseError;

/// What the driver told us about a failed statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DriverFailure {
    /// The SQLSTATE, or empty when the failure did not come from the database server.
    pub state_code: String,
    /// The primary message, followed by the `DETAIL:` and `HINT:` lines the server sent.
    pub detail_text: String,
}

impl DriverFailure {
    pub fn new(state_code: impl Into<String>, detail_text: impl Into<String>) -> DriverFailure {
        DriverFailure {
            state_code: state_code.into(),
            detail_text: detail_text.into(),
        }
    }

    /// Assemble the detail text the way `psql` prints a server error.
    pub fn from_parts(
        state_code: impl Into<String>,
        message: &str,
        detail: Option<&str>,
        hint: Option<&str>,
    ) -> DriverFailure {
        let mut detail_text = message.to_string();
        if let Some(detail) = detail {
            detail_text.push_str("\nDETAIL:  ");
            detail_text.push_str(detail);
        }
        if let Some(hint) = hint {
            detail_text.push_str("\nHINT:  ");
            detail_text.push_str(hint);
        }
        DriverFailure::new(state_code, detail_text)
    }
}

impl From<&sqlx::Error> for DriverFailure {
    fn from(error: &sqlx::Error) -> DriverFailure {
        match error.as_database_error() {
            Some(db_error) => {
                let state_code = db_error
                    .code()
                    .map(Cow::into_owned)
                    .unwrap_or_default();
                match db_error.try_downcast_ref::<PgDatabaseError>() {
                    Some(pg_error) => DriverFailure::from_parts(
                        state_code,
                        pg_error.message(),
                        pg_error.detail(),
                        pg_error.hint(),
                    ),
                    None => DriverFailure::new(state_code, db_error.message()),
                }
            }
            None => DriverFailure::new(String::new(), error.to_string()),
        }
    }
}
