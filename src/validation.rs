use crate::error::{ChatGraphError, ChatGraphResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> ChatGraphResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(ChatGraphError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Normalizes a group name for matching: trimmed and lowercased.
pub fn normalize_name(value: Option<&str>) -> String {
    value.unwrap_or("").trim().to_lowercase()
}
