pub mod change;
pub mod change_request;
pub mod field_violation;
pub mod file_ref;
pub mod cli;
pub mod config;
