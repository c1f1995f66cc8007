pub mod config;
pub mod logging_config;
pub mod prompts_config;
