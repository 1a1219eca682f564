//! 역할 버전 관리자 핸들러
//!
//! 두 엔드포인트 모두 관리자 역할이 필요하며 라우트 스코프에서 검사합니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::rbac::{InvalidateTokensRequest, InvalidateTokensResponse, RolesVersionResponse},
        models::auth::AuthenticatedUser,
    },
    services::{audit::AdminActionLogService, rbac::RolesVersionService},
};

/// 현재 역할 버전 조회
///
/// # Endpoint
/// `GET /api/v1/admin/rbac/version`
///
/// ```json
/// { "version": 3 }
/// ```
#[get("/version")]
pub async fn get_roles_version(
    versions: web::Data<RolesVersionService>,
) -> AppResult<HttpResponse> {
    let version = versions.get().await?;
    Ok(HttpResponse::Ok().json(RolesVersionResponse { version }))
}

/// 역할 버전을 올려 기존 액세스 토큰을 모두 무효화
///
/// 감사 로그는 응답과 분리되어 기록되며, 그 성공 여부는 응답에 영향을 주지 않습니다.
///
/// # Endpoint
/// `POST /api/v1/admin/rbac/invalidate-tokens`
///
/// 본문은 선택입니다: `{ "reason": "..." }` (256자 이하)
#[post("/invalidate-tokens")]
pub async fn invalidate_tokens(
    versions: web::Data<RolesVersionService>,
    audit: web::Data<AdminActionLogService>,
    admin: AuthenticatedUser,
    payload: Option<web::Json<InvalidateTokensRequest>>,
) -> AppResult<HttpResponse> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    request
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let version = versions.bump().await?;

    log::info!(
        "🔐 토큰 일괄 무효화: 관리자 {}, 새 역할 버전 {}",
        admin.user_id,
        version
    );

    let _ = audit.log_roles_version_bump(version, request.reason.as_deref(), Some(admin.user_id));

    Ok(HttpResponse::Ok().json(InvalidateTokensResponse::new(version)))
}
