use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::item::EndpointItem;

/// Closed set of field types an endpoint schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Image,
}

/// One typed field in an endpoint schema. Field order is significant: it
/// drives form rendering and preview traversal.
///
/// Wire names (`tipo`, `mult`) are the upstream contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointField {
    pub title: String,
    pub tipo: FieldKind,
    /// Multi-line rendering for string fields; ignored for other kinds.
    #[serde(default)]
    pub mult: bool,
}

impl EndpointField {
    pub fn new(title: impl Into<String>, tipo: FieldKind) -> Self {
        Self { title: title.into(), tipo, mult: false }
    }

    pub fn multiline(title: impl Into<String>) -> Self {
        Self { title: title.into(), tipo: FieldKind::String, mult: true }
    }
}

/// A user-defined schema: a title plus an ordered list of typed fields.
/// The upstream service owns the authoritative copy; this type is the
/// normalized view the gateway passes around.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub campos: Vec<EndpointField>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Items embedded by the upstream on fetch; absent on most responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<EndpointItem>>,
}

/// Payload accepted when creating an endpoint: title plus raw field list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDraft {
    pub title: String,
    pub campos: Vec<EndpointField>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_kind_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_value(FieldKind::String).unwrap(), json!("string"));
        assert_eq!(serde_json::to_value(FieldKind::Number).unwrap(), json!("number"));
        assert_eq!(serde_json::to_value(FieldKind::Image).unwrap(), json!("image"));
    }

    #[test]
    fn endpoint_deserializes_upstream_shape() {
        let raw = json!({
            "id": "e1",
            "title": "Produtos",
            "campos": [
                { "title": "nome", "tipo": "string", "mult": false },
                { "title": "preco", "tipo": "number", "mult": false }
            ],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        let endpoint: Endpoint = serde_json::from_value(raw).unwrap();
        assert_eq!(endpoint.campos.len(), 2);
        assert_eq!(endpoint.campos[1].tipo, FieldKind::Number);
        assert!(endpoint.items.is_none());
    }

    #[test]
    fn endpoint_tolerates_missing_campos_and_timestamps() {
        let raw = json!({ "id": "e2", "title": "Vazio" });
        let endpoint: Endpoint = serde_json::from_value(raw).unwrap();
        assert!(endpoint.campos.is_empty());
        assert!(endpoint.created_at.is_none());
    }

    #[test]
    fn unknown_field_kind_is_rejected() {
        let raw = json!({ "title": "x", "tipo": "boolean", "mult": false });
        assert!(serde_json::from_value::<EndpointField>(raw).is_err());
    }
}
