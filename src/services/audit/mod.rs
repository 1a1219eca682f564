pub mod admin_action_log_service;

pub use admin_action_log_service::*;
