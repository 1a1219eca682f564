//! # Repository Layer
//!
//! 역할 버전과 감사 로그의 데이터 액세스 계층입니다.
//!
//! ```text
//! RolesVersionService ──▶ dyn RolesVersionStore ──┬─▶ SystemStateRepository  (system_state)
//!                                                  └─▶ RedisRolesVersionStore ──▶ dyn VersionCounter (SET NX / INCRBY)
//! AdminActionLogService ─▶ dyn AdminActionSink ───▶ AdminActionRepository  (admin_action_logs)
//! ```
//!
//! 서비스는 구체 타입이 아니라 trait 객체에 의존하므로 테스트에서는
//! 메모리 구현으로 바꿔 끼울 수 있습니다.

pub mod rbac;

pub use rbac::*;
