use std::path::PathBuf;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PromptsConfig {
    /// Directory holding `<version>.md` prompt files.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Kept as a raw value so a mistyped entry (e.g. `default_version = 1`)
    /// surfaces as an invalid-version error instead of a config parse failure.
    #[serde(default)]
    pub default_version: Option<toml::Value>,
}
