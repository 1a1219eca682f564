//! # 역할 버전 가드
//!
//! 인증된 요청마다 토큰의 `roles_ver` 와 저장소의 현재 역할 버전을 비교합니다.
//!
//! | 상황 | 결과 |
//! |------|------|
//! | 인증 정보 없음 / `roles_ver` 없음 | 통과 |
//! | `roles_ver >= current` | 통과 |
//! | `roles_ver < current` (잘못된 값은 0) | 401 `stale_session` |
//! | 저장소 장애 | `VersionCheckFailurePolicy` 에 따라 통과 또는 503 |
//!
//! 현재 버전은 캐싱하지 않으므로 버전 증가 직후의 요청부터 바로 거부됩니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use crate::{
    config::{RbacConfig, VersionCheckFailurePolicy},
    domain::models::{auth::AuthenticatedUser, rbac::RolesVersionClaim},
    services::rbac::RolesVersionService,
};

/// 가드 판정 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Reject { token_version: i64, current_version: i64 },
}

impl GuardDecision {
    /// 클레임이 있을 때의 판정. 클레임이 없으면 호출하지 않습니다.
    pub fn evaluate(claim: &RolesVersionClaim, current_version: i64) -> Self {
        let token_version = claim.effective_version();
        if token_version >= current_version {
            GuardDecision::Pass
        } else {
            GuardDecision::Reject { token_version, current_version }
        }
    }
}

/// 오래된 토큰 거부 응답 (401)
pub fn stale_session_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "error": "stale_session",
        "message": "Your session is stale because roles or permissions have changed. Please sign in again."
    }))
}

/// 역할 버전 가드 미들웨어
#[derive(Clone)]
pub struct RolesVersionGuard {
    versions: Arc<RolesVersionService>,
    failure_policy: VersionCheckFailurePolicy,
}

impl RolesVersionGuard {
    pub fn new(versions: Arc<RolesVersionService>, failure_policy: VersionCheckFailurePolicy) -> Self {
        Self { versions, failure_policy }
    }

    /// 싱글톤 서비스와 `ROLES_VERSION_FAILURE_POLICY` 설정으로 생성
    ///
    /// 정책이 설정되지 않았으면 에러를 반환합니다.
    pub fn from_config() -> Result<Self, String> {
        let failure_policy = RbacConfig::failure_policy()?;
        log::info!("🛡️ 역할 버전 가드 활성화 (저장소 장애 시 {})", failure_policy);
        Ok(Self::new(RolesVersionService::instance(), failure_policy))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RolesVersionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RolesVersionGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RolesVersionGuardService {
            service: Rc::new(service),
            versions: self.versions.clone(),
            failure_policy: self.failure_policy,
        }))
    }
}

pub struct RolesVersionGuardService<S> {
    service: Rc<S>,
    versions: Arc<RolesVersionService>,
    failure_policy: VersionCheckFailurePolicy,
}

impl<S, B> Service<ServiceRequest> for RolesVersionGuardService<S>
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
        let versions = self.versions.clone();
        let failure_policy = self.failure_policy;

        Box::pin(async move {
            let principal = req
                .extensions()
                .get::<AuthenticatedUser>()
                .filter(|user| user.roles_version.is_present())
                .map(|user| (user.user_id.clone(), user.roles_version.clone()));

            let Some((user_id, claim)) = principal else {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            };

            match versions.get().await {
                Ok(current_version) => match GuardDecision::evaluate(&claim, current_version) {
                    GuardDecision::Pass => {}
                    GuardDecision::Reject { token_version, current_version } => {
                        log::info!(
                            "🚫 오래된 세션 거부: 사용자 ID {}, 토큰 버전 {} < 현재 버전 {} ({})",
                            user_id,
                            token_version,
                            current_version,
                            req.path()
                        );
                        let (req, _) = req.into_parts();
                        return Ok(ServiceResponse::new(req, stale_session_response())
                            .map_into_right_body());
                    }
                },
                Err(err) => match failure_policy {
                    VersionCheckFailurePolicy::FailOpen => {
                        log::warn!(
                            "⚠️ 역할 버전 확인 불가, fail-open 으로 통과: 사용자 ID {} ({})",
                            user_id,
                            err
                        );
                    }
                    VersionCheckFailurePolicy::FailClosed => {
                        log::error!(
                            "❌ 역할 버전 확인 불가, fail-closed 로 거부: 사용자 ID {} ({})",
                            user_id,
                            err
                        );
                        let response = err.error_response();
                        let (req, _) = req.into_parts();
                        return Ok(ServiceResponse::new(req, response).map_into_right_body());
                    }
                },
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
