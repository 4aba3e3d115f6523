//! Building blocks for parameterized SQL: bound values and placeholder names,
//! predicate and option fragments, the `ORDER BY` guard, and the positional
//! rendering handed to the database client.

pub mod bindings;
pub mod guard;
pub mod helpers;
pub mod string;
