//! 영속 엔티티
//!
//! - [`rbac::system_state`] - 역할 버전 싱글톤 문서 (`system_state` 컬렉션)
//! - [`rbac::admin_action_log`] - 관리자 작업 감사 로그 (`admin_action_logs` 컬렉션)

pub mod rbac;
