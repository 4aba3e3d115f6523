//! Configuration for the query engine.

use query_engine_metadata::metadata::NamingConventions;

use crate::values::{OrderBySettings, PagingSettings};

/// The 'Configuration' type collects all the information necessary to parametrize filters and
/// translate failures at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which validates what the serialized format cannot express.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    pub conventions: NamingConventions,
    pub order_by: OrderBySettings,
    pub paging: PagingSettings,
}
