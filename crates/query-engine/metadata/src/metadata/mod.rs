//! Static knowledge the query engine relies on instead of a database schema:
//! how column names encode their types, and how SQLSTATE codes map onto the
//! stable error contract.

pub mod naming;
pub mod sqlstate;

// re-export without modules
pub use naming::*;
pub use sqlstate::*;
