use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record stored under an endpoint. `data` keys should match the owning
/// endpoint's field titles, but the upstream does not migrate items when a
/// schema is edited afterwards, so keys may be missing, extra, or renamed.
/// The form layer reconciles; this type just carries what was stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointItem {
    pub id: String,
    /// Owning endpoint. Defaults to empty when the upstream omits it; the
    /// ownership check only fires on a non-empty mismatch.
    #[serde(rename = "endpointId", default)]
    pub endpoint_id: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl EndpointItem {
    /// True when this item's stored owner disagrees with `endpoint_id`.
    /// An empty stored owner is inconclusive, not a mismatch.
    pub fn owned_by_other(&self, endpoint_id: &str) -> bool {
        !self.endpoint_id.is_empty() && self.endpoint_id != endpoint_id
    }
}
