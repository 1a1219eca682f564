//! # Service Layer
//!
//! 애플리케이션 로직을 담당하는 서비스 계층입니다.
//!
//! - [`auth`] - JWT 발급/검증
//! - [`rbac`] - 역할 버전 조회/증가
//! - [`audit`] - 관리자 작업 감사 로그 (요청과 분리된 비동기 기록)
//!
//! 각 서비스는 `instance()` 싱글톤을 제공하며, `inventory` 로 등록되어
//! `ServiceLocator::initialize_all()` 시점에 미리 생성됩니다.
//! 협력 객체를 직접 받는 `new` 생성자는 테스트 조립에 사용됩니다.

pub mod auth;
pub mod rbac;
pub mod audit;

pub use auth::*;
pub use rbac::*;
pub use audit::*;
