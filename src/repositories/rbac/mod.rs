pub mod roles_version_store;
pub mod system_state_repo;
pub mod redis_roles_version_store;
pub mod admin_action_repo;

#[cfg(test)]
pub mod in_memory;

pub use roles_version_store::*;
pub use system_state_repo::*;
pub use redis_roles_version_store::*;
pub use admin_action_repo::*;
