//! Input validation helpers
//!
//! Centralized text length constants and validation functions for the CRUD
//! handlers, plus record-id shape checks.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: catalog options, monogram text, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: fabric/color ids, coupon codes, phone numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Shipping addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Whether a raw id looks like a well-formed record key ("table:key" or a
/// bare key of safe characters). Malformed ids are treated as a not-found
/// result by lookups, never as a hard failure.
pub fn is_well_formed_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 128 {
        return false;
    }
    let key = match raw.split_once(':') {
        Some((table, key)) => {
            if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return false;
            }
            key
        }
        None => raw,
    };
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
