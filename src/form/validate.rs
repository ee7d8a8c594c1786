//! Create-endpoint field list validation. Edit flows are deliberately not
//! validated this way; only creation rejects duplicates.

use thiserror::Error;

use crate::model::EndpointField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldListError {
    #[error("at least one field with a non-empty title is required")]
    NoFields,
    #[error("duplicate field title: {0}")]
    DuplicateTitle(String),
}

/// Drop fields with blank titles, require at least one survivor, and reject
/// titles that collide case-insensitively. Returns the cleaned field list to
/// forward upstream.
pub fn validate_draft_fields(
    campos: &[EndpointField],
) -> Result<Vec<EndpointField>, FieldListError> {
    let valid: Vec<EndpointField> = campos
        .iter()
        .filter(|campo| !campo.title.trim().is_empty())
        .cloned()
        .collect();

    if valid.is_empty() {
        return Err(FieldListError::NoFields);
    }

    let mut seen = std::collections::HashSet::new();
    for campo in &valid {
        if !seen.insert(campo.title.to_lowercase()) {
            return Err(FieldListError::DuplicateTitle(campo.title.clone()));
        }
    }

    Ok(valid)
}
