use crate::enums::parser_error_code::ParserErrorCode;
use crate::enums::resolver_error_code::ResolverErrorCode;
use crate::errors::{ErrorCode, ParserError, ResolverError};

/// Turns core errors into user-facing lines and process exit codes.
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn resolver_message(error: &ResolverError) -> String {
        let detail = Self::detail(error.source_detail().map(ToString::to_string), error.message());

        match error.code() {
            ResolverErrorCode::NotFound => format!("Prompt not found: {}", detail),
            ResolverErrorCode::InvalidVersion => format!("Invalid version: {}", detail),
            ResolverErrorCode::IoError => format!("File error: {}", detail),
            _ => format!("An unexpected error occurred: {}", detail),
        }
    }

    pub fn parser_message(error: &ParserError) -> String {
        let detail = Self::detail(error.source_detail().map(ToString::to_string), error.message());

        match error.code() {
            ParserErrorCode::InvalidMarkup => format!("Invalid markup: {}", detail),
            ParserErrorCode::MissingElement => format!("Missing element: {}", detail),
            ParserErrorCode::ParsingError => format!("Parsing error: {}", detail),
        }
    }

    /// Exit code for a classification; unrecognised codes fall back to 1.
    pub fn exit_code<C: ErrorCode>(code: C) -> i32 {
        match code.name() {
            "INVALID_MARKUP" => 2,
            "MISSING_ELEMENT" => 3,
            "PARSING_ERROR" => 4,
            _ => 1,
        }
    }

    pub fn report_resolver_error(error: &ResolverError) -> i32 {
        log::debug!("{}", error.technical_details());
        eprintln!("❌ {}", Self::resolver_message(error));
        Self::exit_code(error.code())
    }

    pub fn report_parser_error(error: &ParserError) -> i32 {
        log::debug!("{}", error.technical_details());
        eprintln!("❌ {}", Self::parser_message(error));
        if let Some(line) = error.context_value("line_number") {
            let column = error.context_value("column").map(ToString::to_string).unwrap_or_default();
            eprintln!("   at line {}, column {}", line, column);
        }
        Self::exit_code(error.code())
    }

    fn detail(source: Option<String>, fallback: &str) -> String {
        source.unwrap_or_else(|| fallback.to_string())
    }
}
