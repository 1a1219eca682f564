//! # HTTP 미들웨어
//!
//! - [`AuthMiddleware`] - Bearer 토큰 검증 후 `AuthenticatedUser` 를 요청 extensions 에 저장
//! - [`RolesVersionGuard`] - 토큰의 `roles_ver` 가 현재 역할 버전보다 낮으면 401
//!
//! actix-web 에서는 나중에 `wrap` 한 미들웨어가 먼저 실행되므로,
//! 가드가 인증 결과를 읽을 수 있도록 인증 미들웨어를 바깥쪽에 둡니다.
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(RolesVersionGuard::from_config()?)
//!     .wrap(AuthMiddleware::optional())
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod roles_version_guard;

pub use auth_middleware::AuthMiddleware;
pub use roles_version_guard::{GuardDecision, RolesVersionGuard};
