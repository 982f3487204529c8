//! Result types for async persistence operations.

use std::path::PathBuf;

/// Result of an async save operation
pub struct SaveResult {
    pub path: PathBuf,
    pub error: Option<String>,
}
