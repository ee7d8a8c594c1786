use serde::{Deserialize, Serialize};

/// The authenticated user as reported to the frontend. `name` is never
/// stored; it is derived from the email on every resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Fallback display name when the email has no usable local part.
pub const DEFAULT_DISPLAY_NAME: &str = "Usuário";

/// Derive a display name from an email address: take the local part, split
/// on `.`, `_` and `-`, capitalize the first character of each segment, and
/// join with spaces.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");
    if local.is_empty() {
        return DEFAULT_DISPLAY_NAME.to_string();
    }

    let name = local
        .split(['.', '_', '-'])
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        DEFAULT_DISPLAY_NAME.to_string()
    } else {
        name
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
