//! 도메인 모델
//!
//! 영속되지 않는 값 객체들입니다.
//!
//! - [`token`] - JWT 클레임
//! - [`auth`] - 인증된 사용자와 접근 정책
//! - [`rbac`] - 역할 버전 클레임 해석과 WhoAmI 투영

pub mod token;
pub mod auth;
pub mod rbac;

pub use token::*;
pub use auth::*;
pub use rbac::*;
