use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single image hit as returned to clients.
///
/// Values are copied from the provider as-is; a field the provider left out is
/// left out here too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(rename = "pageURL", default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<Value>,
}
