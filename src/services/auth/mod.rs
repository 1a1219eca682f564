//! 인증 서비스 모듈
//!
//! HS256 JWT 의 발급과 검증을 담당합니다. 발급되는 액세스 토큰에는
//! 발급 시점의 역할 버전이 `roles_ver` 클레임으로 기록되며,
//! 이후 [`RolesVersionGuard`](crate::middlewares::RolesVersionGuard) 가 요청마다 이 값을 검사합니다.
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//! let version = RolesVersionService::instance().get().await?;
//! let token = token_service.issue_access_token(&principal, version)?;
//! ```

pub mod token_service;

pub use token_service::*;
