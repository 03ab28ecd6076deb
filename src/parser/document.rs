//! Input parsing and validation.
//!
//! Turns raw JSON text into a `serde_json::Value` and checks the
//! group-by field list before any aggregation starts.

use crate::utils::error::FlameError;
use log::debug;
use serde_json::Value;
use std::collections::HashSet;

/// Parse JSON text into a document value
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `FlameError::InvalidJson` - text is not valid JSON (carries line/column)
/// * `FlameError::NotAContainer` - root is a scalar
pub fn parse_document(text: &str) -> Result<Value, FlameError> {
    debug!("Parsing JSON document ({} bytes)", text.len());

    let value: Value = serde_json::from_str(text)?;
    ensure_container(&value)?;

    Ok(value)
}

/// Check that a document root is an object or an array
pub fn ensure_container(value: &Value) -> Result<(), FlameError> {
    match value {
        Value::Object(_) | Value::Array(_) => Ok(()),
        other => Err(FlameError::NotAContainer(kind_name(other))),
    }
}

/// Validate the group-by field list
///
/// Empty names are rejected, and so are duplicates: a field can only be
/// consumed once along a path, so a repeated name would silently do nothing.
pub fn validate_group_fields(fields: &[String]) -> Result<(), FlameError> {
    let mut seen = HashSet::with_capacity(fields.len());

    for (i, field) in fields.iter().enumerate() {
        if field.is_empty() {
            return Err(FlameError::EmptyField(i + 1));
        }
        if !seen.insert(field.as_str()) {
            return Err(FlameError::DuplicateField(field.clone()));
        }
    }

    Ok(())
}

/// Human-readable name of a JSON value's type, for error messages
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
