//! Typed body for the upstream's `POST /api/itens/query` filtered search.
//! The gateway only ever issues one query shape: equality on `endpointId`
//! with a hard result cap.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryFilter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "==")]
    Eq,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemQuery {
    pub filters: Vec<QueryFilter>,
    pub limit: u32,
}

impl ItemQuery {
    /// All items belonging to `endpoint_id`, up to `limit`. Results past the
    /// cap are not retrievable through this path.
    pub fn by_endpoint(endpoint_id: &str, limit: u32) -> Self {
        Self {
            filters: vec![QueryFilter {
                field: "endpointId".to_string(),
                op: FilterOp::Eq,
                value: Value::String(endpoint_id.to_string()),
            }],
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn by_endpoint_serializes_to_upstream_wire_shape() {
        let query = ItemQuery::by_endpoint("e1", 200);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "filters": [ { "field": "endpointId", "op": "==", "value": "e1" } ],
                "limit": 200
            })
        );
    }
}
