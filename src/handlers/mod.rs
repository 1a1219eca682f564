//! HTTP 핸들러
//!
//! - [`rbac`] - 관리자용 역할 버전 조회/증가
//! - [`auth`] - 현재 토큰 기준 유효 권한 조회 (WhoAmI)
//!
//! 서비스는 `web::Data` 로 주입받습니다. `main` 에서 싱글톤 인스턴스를 등록하고,
//! 테스트에서는 메모리 저장소로 조립한 인스턴스를 등록합니다.

pub mod rbac;
pub mod auth;
