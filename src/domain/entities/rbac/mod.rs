pub mod system_state;
pub mod admin_action_log;

pub use system_state::*;
pub use admin_action_log::*;
