use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::config::constants::{DEFAULT_PROMPTS_DIR, PROMPT_FILE_EXTENSION};
use crate::enums::prompt_version::{PromptVersion, CURRENT_VERSION};
use crate::enums::resolver_error_code::ResolverErrorCode;
use crate::enums::version_input::VersionInput;
use crate::errors::{ErrorSource, ResolverError, ResolverResult};

/// Loads the instruction prompt for the bundled prompt directory.
pub fn get_prompt_by_version(version: impl Into<VersionInput>) -> ResolverResult<String> {
    PromptResolver::default().resolve(version)
}

/// Loads the prompt for [`CURRENT_VERSION`] from the bundled prompt directory.
pub fn get_current_prompt() -> ResolverResult<String> {
    get_prompt_by_version(CURRENT_VERSION)
}

/// Maps prompt versions to `<prompts_dir>/<version>.md` and reads them.
#[derive(Debug, Clone)]
pub struct PromptResolver {
    prompts_dir: PathBuf,
}

impl Default for PromptResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPTS_DIR.clone())
    }
}

impl PromptResolver {
    pub fn new(prompts_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompts_dir: prompts_dir.into(),
        }
    }

    pub fn prompts_dir(&self) -> &Path {
        &self.prompts_dir
    }

    /// Validates the version and loads its prompt. Loading only happens when
    /// validation succeeded; whichever step fails first is returned as is.
    pub fn resolve(&self, version: impl Into<VersionInput>) -> ResolverResult<String> {
        normalize_version(version).and_then(|normalized| self.load_resource(&normalized))
    }

    pub fn resource_path(&self, version: &str) -> PathBuf {
        self.prompts_dir
            .join(format!("{}.{}", version, PROMPT_FILE_EXTENSION))
    }

    /// Reads the prompt for an already-normalized version. The text is returned untrimmed.
    pub fn load_resource(&self, version: &str) -> ResolverResult<String> {
        let path = self.resource_path(version);
        let file_path = path.display().to_string();

        if !path.exists() {
            log::debug!("Prompt file {} does not exist", file_path);
            return Err(ResolverError::with_source(
                ResolverErrorCode::NotFound,
                format!("Prompt file '{}' does not exist.", file_path),
            )
            .with_context([
                ("file_path", file_path.as_str()),
                ("version", version),
                ("operation", "file_load"),
            ]));
        }

        // The file may vanish between the check above and this read; that
        // case is reported as not found below rather than prevented.
        match fs::read_to_string(&path) {
            Ok(content) => {
                log::debug!("Loaded prompt {} ({} bytes)", file_path, content.len());
                Ok(content)
            }
            Err(error) => Err(read_error(error, &file_path)),
        }
    }
}

/// Checks that `version` names a supported prompt and returns its canonical form.
pub fn normalize_version(version: impl Into<VersionInput>) -> ResolverResult<String> {
    match version.into() {
        VersionInput::Tag(tag) => Ok(tag.as_str().to_string()),
        VersionInput::Text(text) => match text.parse::<PromptVersion>() {
            Ok(tag) => Ok(tag.as_str().to_string()),
            Err(normalized) => {
                let valid = PromptVersion::valid_values();
                log::debug!("Unknown prompt version '{}'", normalized);

                Err(ResolverError::with_source(
                    ResolverErrorCode::NotFound,
                    format!("Unknown version '{}'. Valid: {:?}", normalized, valid),
                )
                .with_context([
                    ("input_version", json!(text)),
                    ("normalized_version", json!(normalized)),
                    ("valid_versions", json!(valid)),
                ]))
            }
        },
        VersionInput::Other { type_name, value } => Err(ResolverError::with_source(
            ResolverErrorCode::InvalidVersion,
            "Version must be a string or PromptVersion",
        )
        .with_context([("input_type", json!(type_name)), ("input_value", json!(value))])),
    }
}

fn read_error(error: std::io::Error, file_path: &str) -> ResolverError {
    log::debug!("Failed to read prompt file {}: {}", file_path, error);

    let (code, error_type) = match error.kind() {
        ErrorKind::PermissionDenied => (ResolverErrorCode::IoError, "permission_denied"),
        ErrorKind::NotFound => (ResolverErrorCode::NotFound, "file_disappeared"),
        ErrorKind::InvalidData => (ResolverErrorCode::UnknownError, "invalid_data"),
        _ => (ResolverErrorCode::UnknownError, "unknown"),
    };

    let kind: Value = json!(format!("{:?}", error.kind()));
    ResolverError::with_source(code, ErrorSource::fault(error)).with_context([
        ("file_path", json!(file_path)),
        ("operation", json!("read")),
        ("error_type", json!(error_type)),
        ("io_error_kind", kind),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with_prompt(content: &str) -> (tempfile::TempDir, PromptResolver) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("v0.1.md"), content).unwrap();
        let resolver = PromptResolver::new(dir.path());
        (dir, resolver)
    }

    #[test]
    fn normalizes_tags_and_text() {
        assert_eq!(normalize_version(PromptVersion::V0_1).unwrap(), "v0.1");
        assert_eq!(normalize_version("v0.1").unwrap(), "v0.1");
        assert_eq!(normalize_version("V0.1").unwrap(), "v0.1");
        assert_eq!(normalize_version("  v0.1\n").unwrap(), "v0.1");
    }

    #[test]
    fn unknown_text_is_not_found_with_valid_set() {
        let error = normalize_version(" V9.9").unwrap_err();

        assert_eq!(error.code(), ResolverErrorCode::NotFound);
        assert_eq!(error.context_value("input_version"), Some(&json!(" V9.9")));
        assert_eq!(error.context_value("normalized_version"), Some(&json!("v9.9")));
        assert_eq!(error.context_value("valid_versions"), Some(&json!(["v0.1"])));
        assert!(error.source_detail().unwrap().to_string().contains("Unknown version 'v9.9'"));
    }

    #[test]
    fn wrong_kind_is_invalid_version() {
        let error = normalize_version(42).unwrap_err();

        assert_eq!(error.code(), ResolverErrorCode::InvalidVersion);
        assert_eq!(error.context_value("input_type"), Some(&json!("int")));
        assert_eq!(error.context_value("input_value"), Some(&json!("42")));
    }

    #[test]
    fn loads_content_untrimmed() {
        let (_dir, resolver) = resolver_with_prompt("\n  # Prompt\n\n");
        assert_eq!(resolver.load_resource("v0.1").unwrap(), "\n  # Prompt\n\n");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = PromptResolver::new(dir.path());
        let error = resolver.load_resource("v0.1").unwrap_err();

        assert_eq!(error.code(), ResolverErrorCode::NotFound);
        assert_eq!(error.context_value("version"), Some(&json!("v0.1")));
        assert_eq!(error.context_value("operation"), Some(&json!("file_load")));
        assert_eq!(
            error.context_value("file_path"),
            Some(&json!(dir.path().join("v0.1.md").display().to_string()))
        );
    }

    #[test]
    fn non_utf8_content_is_unknown_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("v0.1.md"), [0xff, 0xfe, 0x00]).unwrap();
        let error = PromptResolver::new(dir.path()).load_resource("v0.1").unwrap_err();

        assert_eq!(error.code(), ResolverErrorCode::UnknownError);
        assert_eq!(error.context_value("operation"), Some(&json!("read")));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn read_failures_are_classified_by_kind() {
        let permission = read_error(std::io::Error::from(ErrorKind::PermissionDenied), "/p/v0.1.md");
        assert_eq!(permission.code(), ResolverErrorCode::IoError);
        assert_eq!(permission.context_value("error_type"), Some(&json!("permission_denied")));

        let vanished = read_error(std::io::Error::from(ErrorKind::NotFound), "/p/v0.1.md");
        assert_eq!(vanished.code(), ResolverErrorCode::NotFound);

        let other = read_error(std::io::Error::from(ErrorKind::Interrupted), "/p/v0.1.md");
        assert_eq!(other.code(), ResolverErrorCode::UnknownError);
        assert_eq!(other.context_value("file_path"), Some(&json!("/p/v0.1.md")));
    }

    #[test]
    fn directory_in_place_of_file_is_not_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("v0.1.md")).unwrap();
        let error = PromptResolver::new(dir.path()).load_resource("v0.1").unwrap_err();

        assert_ne!(error.code(), ResolverErrorCode::NotFound);
        assert_eq!(error.context_value("operation"), Some(&json!("read")));
    }

    #[test]
    fn resolve_short_circuits_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = PromptResolver::new(dir.path().join("does-not-exist"));

        let error = resolver.resolve("v9.9").unwrap_err();
        assert_eq!(error.code(), ResolverErrorCode::NotFound);
        assert!(error.context_value("file_path").is_none());
    }

    #[test]
    fn resolve_reads_normalized_version() {
        let (_dir, resolver) = resolver_with_prompt("prompt body");
        assert_eq!(resolver.resolve("V0.1 ").unwrap(), resolver.resolve("v0.1").unwrap());
        assert_eq!(resolver.resolve(PromptVersion::V0_1).unwrap(), "prompt body");
    }

    #[test]
    fn bundled_prompt_is_available() {
        let prompt = get_current_prompt().unwrap();
        assert!(prompt.contains("<code-change>"));
    }
}
