use serde::{Deserialize, Serialize};
use crate::structs::config::logging_config::LoggingConfig;
use crate::structs::config::prompts_config::PromptsConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub prompts: PromptsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
