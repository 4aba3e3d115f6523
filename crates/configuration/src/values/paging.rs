use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Bounds applied to `limit` filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagingSettings {
    /// Larger limits are clamped to this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_limit: Option<u64>,
}

impl PagingSettings {
    pub fn is_default(&self) -> bool {
        self.max_limit.is_none()
    }
}
