use serde::{Deserialize, Serialize};

use crate::errors::ErrorCode;

/// Classification of prompt resolution failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ResolverErrorCode {
    NotFound,
    InvalidVersionValue,
    InvalidVersion,
    IoError,
    UnknownError,
}

impl ErrorCode for ResolverErrorCode {
    fn message(&self) -> &'static str {
        match self {
            Self::NotFound => "Prompt not found",
            Self::InvalidVersionValue => "Invalid prompt version value",
            Self::InvalidVersion => "Invalid prompt version",
            Self::IoError => "Input/Output error",
            Self::UnknownError => "An unknown error occurred",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::InvalidVersionValue => "INVALID_VERSION_VALUE",
            Self::InvalidVersion => "INVALID_VERSION",
            Self::IoError => "IO_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}
