use crate::config::constants::DEFAULT_LOG_LEVEL;

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_log_level() -> String {
        DEFAULT_LOG_LEVEL.to_string()
    }
}
