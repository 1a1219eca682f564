use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::services::auth::TokenService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
    /// 지정되지 않으면 `TokenService::instance()`
    pub token_service: Option<Arc<TokenService>>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;
        let required_role = self.required_role.clone();
        let token_service = self.token_service.clone();

        Box::pin(async move {
            // 바깥쪽 인증 미들웨어가 이미 검증한 경우 재사용
            let existing = req.extensions().get::<AuthenticatedUser>().cloned();
            let auth_result = match existing {
                Some(user) => Ok(user),
                None => authenticate(&req, token_service),
            };

            match (mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {}", err);
                    let response = AppError::AuthenticationError(
                        "유효한 인증 토큰이 필요합니다".to_string(),
                    )
                    .error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied_by(&user) {
                            log::warn!(
                                "권한 부족: 사용자 ID {} ({:?}), 필요 역할: {}",
                                user.user_id,
                                user.roles,
                                required.describe()
                            );
                            let response = AppError::AuthorizationError(format!(
                                "{} 역할이 필요합니다",
                                required.describe()
                            ))
                            .error_response();
                            let (req, _) = req.into_parts();
                            return Ok(ServiceResponse::new(req, response).map_into_right_body());
                        }
                    }

                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(user)) => {
                    log::debug!("선택적 인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Err(err)) => {
                    log::debug!("선택적 인증: 익명으로 진행 ({})", err);
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn authenticate(
    req: &ServiceRequest,
    token_service: Option<Arc<TokenService>>,
) -> AppResult<AuthenticatedUser> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token_service = token_service.unwrap_or_else(TokenService::instance);

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    Ok(AuthenticatedUser::from(claims))
}
