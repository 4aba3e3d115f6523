use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What to do with an `order_by` filter the guard rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum OrderByPolicy {
    /// Drop the ordering without a trace.
    Ignore,
    /// Drop the ordering and emit a warning.
    #[default]
    LogAndIgnore,
    /// Refuse the whole filter set.
    Reject,
}

/// Settings for raw `ORDER BY` expressions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderBySettings {
    #[serde(default)]
    pub policy: OrderByPolicy,
    /// Accept only `column [ASC|DESC]` lists on top of the keyword blacklist.
    #[serde(default = "default_check_shape")]
    pub check_shape: bool,
}

fn default_check_shape() -> bool {
    true
}

impl Default for OrderBySettings {
    fn default() -> Self {
        OrderBySettings {
            policy: OrderByPolicy::default(),
            check_shape: default_check_shape(),
        }
    }
}

impl OrderBySettings {
    pub fn is_default(&self) -> bool {
        self == &OrderBySettings::default()
    }
}
