//! The database side of a request: binding rendered statements to the `sqlx`
//! client, and turning the failures it reports into stable error records.

pub mod extract;
pub mod failure;
pub mod query;
pub mod record;
pub mod translator;

pub use failure::DriverFailure;
pub use record::{ErrorBody, ErrorContext, TranslatedError, ValidationFailure};
pub use translator::{translate, Translator};
