//! 인증 미들웨어
//!
//! ```rust,ignore
//! // 관리자 전용 스코프
//! web::scope("/api/v1/admin/rbac")
//!     .wrap(AuthMiddleware::required_with_role("admin"))
//!     .service(get_version)
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::TokenService;

/// Bearer 토큰 인증 미들웨어
pub struct AuthMiddleware {
    mode: AuthMode,
    required_role: Option<RequiredRole>,
    token_service: Option<Arc<TokenService>>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
            token_service: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
            token_service: None,
        }
    }

    /// 유효한 토큰 필수
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 토큰이 있으면 검증, 없으면 익명으로 통과
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 유효한 토큰과 지정된 역할 필수 (역할 불충족 시 403)
    pub fn required_with_role(role: &str) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role.to_string()))
    }

    /// 전역 `TokenService::instance()` 대신 사용할 토큰 서비스
    pub fn with_token_service(mut self, token_service: Arc<TokenService>) -> Self {
        self.token_service = Some(token_service);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
            required_role: self.required_role.clone(),
            token_service: self.token_service.clone(),
        }))
    }
}
