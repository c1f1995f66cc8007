use std::fmt;

use serde::{Deserialize, Serialize};

/// One field-level validation failure found while decoding a change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub path: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: &[String], field: &str, message: impl Into<String>) -> Self {
        let path = path
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(field))
            .collect::<Vec<_>>()
            .join(" -> ");

        Self { path, message: message.into() }
    }

    /// Joins every violation as `path: message` pairs separated by `"; "`.
    pub fn join(violations: &[FieldViolation]) -> String {
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
