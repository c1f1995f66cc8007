pub mod parser_error_code;
pub mod resolver_error_code;
pub mod prompt_version;
pub mod version_input;
pub mod commands;
