//! Converts LLM change-request markup into a validated [`ChangeRequest`] and
//! resolves the versioned instruction prompt that asks an LLM to produce it.
//!
//! ```no_run
//! use changecraft::{get_prompt_by_version, parse_markup};
//!
//! let prompt = get_prompt_by_version("v0.1").expect("bundled prompt");
//! let request = parse_markup("<code-change><summary>Fix bug</summary></code-change>");
//! assert_eq!(request.map(|r| r.summary).ok().as_deref(), Some("Fix bug"));
//! # let _ = prompt;
//! ```

pub mod config;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod logger;
pub mod services;
pub mod structs;
pub mod workers;

pub use enums::parser_error_code::ParserErrorCode;
pub use enums::prompt_version::{PromptVersion, CURRENT_VERSION};
pub use enums::resolver_error_code::ResolverErrorCode;
pub use enums::version_input::VersionInput;
pub use errors::{Error, ErrorCode, ErrorSource, ParserError, ParserResult, ResolverError, ResolverResult, ResultExt};
pub use services::markup_parser::parse_markup;
pub use services::markup_writer::to_markup;
pub use services::prompt_resolver::{get_prompt_by_version, normalize_version, PromptResolver};
pub use structs::change::{Add, Change, Delete, Modify};
pub use structs::change_request::ChangeRequest;
pub use structs::file_ref::FileRef;
