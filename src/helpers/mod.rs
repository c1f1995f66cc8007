pub mod config_helper;
pub mod text;
