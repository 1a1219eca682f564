//! Data Transfer Objects
//!
//! HTTP API 의 요청/응답 계약을 정의합니다. 관리자 엔드포인트 응답은
//! 래퍼 없이 `{ "version": .. }` 형태 그대로 직렬화됩니다.

pub mod rbac;

pub use rbac::*;
