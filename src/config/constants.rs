use std::path::PathBuf;

use once_cell::sync::Lazy;

pub const APP_NAME: &str = "changecraft";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const PROMPTS_DIR_ENV: &str = "CHANGECRAFT_PROMPTS_DIR";

pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const PROMPT_FILE_EXTENSION: &str = "md";

/// Longest markup prefix (in characters) copied into error context.
pub const MARKUP_CONTEXT_LIMIT: usize = 1000;
pub const TRUNCATION_SUFFIX: &str = "...";

/// Deepest element nesting accepted in change-request markup.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Most nodes (elements, text, comments) a single markup document may contain.
pub const MAX_MARKUP_NODES: u32 = 1_000_000;

/// Prompts bundled with the crate.
pub static DEFAULT_PROMPTS_DIR: Lazy<PathBuf> =
    Lazy::new(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("prompts"));

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
}
