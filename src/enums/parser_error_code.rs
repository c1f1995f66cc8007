use serde::{Deserialize, Serialize};

use crate::errors::ErrorCode;

/// Classification of change-request markup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ParserErrorCode {
    /// Empty input or markup that is not well-formed.
    InvalidMarkup,
    /// The document does not have the required shape.
    MissingElement,
    /// The shape is right but field values are missing or mistyped.
    ParsingError,
}

impl ErrorCode for ParserErrorCode {
    fn message(&self) -> &'static str {
        match self {
            Self::InvalidMarkup => "Invalid markup format",
            Self::MissingElement => "Required element is missing",
            Self::ParsingError => "Error parsing markup",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::InvalidMarkup => "INVALID_MARKUP",
            Self::MissingElement => "MISSING_ELEMENT",
            Self::ParsingError => "PARSING_ERROR",
        }
    }
}
