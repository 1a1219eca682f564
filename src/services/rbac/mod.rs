pub mod roles_version_service;

pub use roles_version_service::*;
