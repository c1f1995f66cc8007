pub mod change_request_logger;
pub mod error_reporter;
