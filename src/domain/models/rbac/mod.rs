pub mod roles_version_claim;
pub mod effective_permissions;

pub use roles_version_claim::*;
pub use effective_permissions::*;
