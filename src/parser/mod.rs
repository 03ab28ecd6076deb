//! Document parsing and input validation.
//!
//! This module handles:
//! - Parsing raw JSON text
//! - Checking that the document root is a container
//! - Validating the group-by field list

pub mod document;

// Re-export main functions
pub use document::{ensure_container, kind_name, parse_document, validate_group_fields};
