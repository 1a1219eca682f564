//! 인증된 사용자 모델
//!
//! [`AuthMiddleware`](crate::middlewares::AuthMiddleware) 가 토큰을 검증한 뒤
//! 요청 extensions 에 넣어두는 주체 정보입니다. 역할 버전 가드와 핸들러는
//! 토큰을 다시 해석하지 않고 이 값을 읽습니다.

use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use crate::core::errors::AppError;
use crate::domain::models::rbac::RolesVersionClaim;
use crate::domain::models::token::TokenClaims;

/// 인증된 사용자 정보
///
/// ```rust,ignore
/// #[get("/me")]
/// async fn me(user: AuthenticatedUser) -> impl Responder {
///     HttpResponse::Ok().json(json!({ "user_id": user.user_id }))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// 사용자 식별자 (`sub` 클레임)
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// 토큰에 기록된 역할, 발급 순서 유지
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    /// 토큰에 기록된 역할 버전
    pub roles_version: RolesVersionClaim,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.has_role(role))
    }
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        let roles_version = RolesVersionClaim::from_claim(claims.roles_ver.as_ref());

        Self {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            roles: claims.roles,
            permissions: claims.permissions,
            roles_version,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}

/// 인증이 선택적인 엔드포인트용 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(roles_ver: Option<&str>) -> TokenClaims {
        TokenClaims {
            sub: "42".to_string(),
            email: Some("admin@example.com".to_string()),
            name: None,
            roles: vec!["admin".to_string(), "user".to_string()],
            permissions: vec!["rbac.write".to_string()],
            roles_ver: roles_ver.map(serde_json::Value::from),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn test_from_claims_parses_roles_version() {
        let user = AuthenticatedUser::from(claims(Some("3")));
        assert_eq!(user.roles_version, RolesVersionClaim::Valid(3));

        let user = AuthenticatedUser::from(claims(Some("three")));
        assert_eq!(user.roles_version, RolesVersionClaim::Malformed("three".to_string()));

        let user = AuthenticatedUser::from(claims(None));
        assert_eq!(user.roles_version, RolesVersionClaim::Absent);
    }

    #[test]
    fn test_non_string_roles_version_is_present() {
        let mut numeric = claims(None);
        numeric.roles_ver = Some(serde_json::json!(4));
        assert_eq!(AuthenticatedUser::from(numeric).roles_version, RolesVersionClaim::Valid(4));

        let mut boolean = claims(None);
        boolean.roles_ver = Some(serde_json::json!(true));
        let user = AuthenticatedUser::from(boolean);
        assert!(user.roles_version.is_present());
        assert_eq!(user.roles_version.effective_version(), 0);
    }

    #[test]
    fn test_role_checks() {
        let user = AuthenticatedUser::from(claims(None));
        assert!(user.has_role("admin"));
        assert!(!user.has_role("auditor"));
        assert!(user.has_any_role(&["auditor", "user"]));
    }

    #[actix_web::test]
    async fn test_extractor_requires_user_in_extensions() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let result = AuthenticatedUser::extract(&req).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));

        req.extensions_mut().insert(AuthenticatedUser::from(claims(Some("1"))));
        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.user_id, "42");

        let OptionalUser(optional) = OptionalUser::extract(&req).await.unwrap();
        assert!(optional.is_some());
    }
}
