use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::constants::{default_config_path, DEFAULT_PROMPTS_DIR, PROMPTS_DIR_ENV};
use crate::enums::prompt_version::CURRENT_VERSION;
use crate::enums::version_input::VersionInput;
use crate::errors::{CliError, CliResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {
    /// Loads the configuration from `path`, or from the user config directory
    /// when no path is given. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let location = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        let Some(location) = location else {
            log::debug!("No config directory available, using defaults");
            return Ok(Config::default());
        };

        if !location.exists() {
            log::debug!("No config file at {}, using defaults", location.display());
            return Ok(Config::default());
        }

        log::info!("📋 Loading config from: {}", location.display());
        let content = fs::read_to_string(&location).map_err(|source| CliError::ConfigRead {
            path: location.display().to_string(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| CliError::ConfigParse {
            path: location.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    /// Prompt directory precedence: environment, then config file, then the bundled prompts.
    pub fn prompts_dir(config: &Config) -> PathBuf {
        if let Some(dir) = env::var_os(PROMPTS_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return PathBuf::from(dir);
        }

        config
            .prompts
            .dir
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPTS_DIR.clone())
    }

    pub fn default_version(config: &Config) -> VersionInput {
        config
            .prompts
            .default_version
            .clone()
            .map_or(VersionInput::Tag(CURRENT_VERSION), VersionInput::from)
    }

    pub fn sample_config() -> String {
        let location = default_config_path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<config dir>/changecraft/config.toml".to_string());

        format!(
            r#"# Changecraft configuration
# Save this file as {location}

[prompts]
# Directory containing <version>.md prompt files.
# Overridden by the {env} environment variable.
# dir = "/path/to/prompts"

# Prompt version printed when no --version is given.
default_version = "{version}"

[logging]
# One of: error, warn, info, debug, trace. RUST_LOG takes precedence.
level = "warn"
"#,
            location = location,
            env = PROMPTS_DIR_ENV,
            version = CURRENT_VERSION,
        )
    }
}
