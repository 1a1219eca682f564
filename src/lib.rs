//! 역할 버전 기반 토큰 무효화 서비스
//!
//! 역할/권한 할당이 바뀌면 시스템 전역 역할 버전(roles version)을 올리고,
//! 그 이전 버전이 기록된 액세스 토큰을 만료 전이라도 다음 요청에서 거부합니다.
//!
//! # Features
//!
//! - **역할 버전 저장소**: MongoDB 싱글톤 문서 또는 Redis 정수 키, 원자적 증가
//! - **역할 버전 가드**: 요청마다 토큰의 `roles_ver` 를 현재 버전과 비교
//! - **관리자 API**: 현재 버전 조회, 토큰 일괄 무효화 (감사 로그 기록)
//! - **WhoAmI**: 토큰 클레임 기반 유효 권한 조회
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← AuthMiddleware → RolesVersionGuard
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← RolesVersionService, AdminActionLogService, TokenService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← RolesVersionStore (Mongo / Redis), AdminActionSink
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod middlewares;
