//! # Configuration Module
//!
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//! Spring Framework의 `@Configuration` 클래스와 유사한 역할을 수행합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 실행 환경, 요청 제한 설정
//! - [`auth_config`] - JWT, 관리자 정책 설정
//! - [`rbac_config`] - 역할 버전 저장소와 가드 정책 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="rbac_version_dev"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//!
//! # 역할 버전
//! export ROLES_VERSION_STORE="mongo"
//! export ROLES_VERSION_FAILURE_POLICY="closed"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod rbac_config;

pub use data_config::*;
pub use auth_config::*;
pub use rbac_config::*;
