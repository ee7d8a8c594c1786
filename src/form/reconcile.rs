//! Field reconciliation: map stored item data onto an endpoint's current
//! field list, producing a schema-complete working set for editing.

use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;

use crate::model::{EndpointField, FieldKind};

/// One resolved form field. Order within [`Reconciliation::fields`] is the
/// endpoint's field order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledField {
    pub title: String,
    pub kind: FieldKind,
    pub mult: bool,
    pub value: Value,
}

/// The reconciled working set. Its key set is always exactly the endpoint's
/// field titles, in the endpoint's field order, regardless of what was
/// stored; `matched` counts how many fields found a stored value.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub fields: Vec<ReconciledField>,
    pub matched: usize,
}

impl Reconciliation {
    /// Serialize the working set as a storage payload. Every schema field is
    /// present; extra stored keys were dropped from the editable view.
    pub fn values(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for field in &self.fields {
            out.insert(field.title.clone(), field.value.clone());
        }
        out
    }
}

/// Normalize a field title for matching: NFD decomposition, strip combining
/// diacritical marks, collapse whitespace runs, lowercase, trim.
pub fn normalize_title(title: &str) -> String {
    let stripped: String = title
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Extract the candidate data object from a stored item value: an inner
/// `data` property when present, otherwise the value itself, otherwise empty.
pub fn candidate_data(stored: Option<&Value>) -> Map<String, Value> {
    let Some(value) = stored else {
        return Map::new();
    };
    let candidate = match value {
        Value::Object(map) => map.get("data").unwrap_or(value),
        other => other,
    };
    match candidate {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    }
}

/// Resolve a stored value for a field title: exact key match first, then
/// normalized match (case/diacritic/whitespace-insensitive). First match
/// wins; multiple normalized collisions have no defined order and only get
/// a warning.
pub fn resolve_value(data: &Map<String, Value>, title: &str) -> Option<Value> {
    if let Some(value) = data.get(title) {
        return Some(value.clone());
    }

    let want = normalize_title(title);
    let mut matches = data
        .iter()
        .filter(|(key, _)| normalize_title(key) == want)
        .map(|(key, value)| (key.clone(), value.clone()));

    let first = matches.next();
    if let (Some((key, _)), Some((other, _))) = (&first, matches.next()) {
        tracing::warn!(
            field = title,
            first = key.as_str(),
            also = other.as_str(),
            "multiple stored keys normalize to the same field title"
        );
    }
    first.map(|(_, value)| value)
}

/// Empty form value for an unmatched field. Every kind hydrates to an empty
/// string; numeric coercion happens on change, not on hydration.
pub fn empty_value(_kind: FieldKind) -> Value {
    Value::String(String::new())
}

/// Reconcile stored item data against the endpoint's field list.
pub fn reconcile(campos: &[EndpointField], stored: Option<&Value>) -> Reconciliation {
    let data = candidate_data(stored);
    let mut fields = Vec::with_capacity(campos.len());
    let mut matched = 0;

    for campo in campos {
        let value = match resolve_value(&data, &campo.title) {
            Some(value) => {
                matched += 1;
                value
            }
            None => empty_value(campo.tipo),
        };
        fields.push(ReconciledField {
            title: campo.title.clone(),
            kind: campo.tipo,
            mult: campo.mult,
            value,
        });
    }

    Reconciliation { fields, matched }
}
