//! Translate an untyped filter map into parameterized SQL fragments.

pub mod error;
pub mod filters;
pub mod result;
pub mod values;

pub use filters::{parametrize, FilterMap, Parametrizer};
pub use result::{ParametrizationResult, QueryOptions};
