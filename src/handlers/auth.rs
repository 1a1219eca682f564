//! 인증 주체 진단 핸들러

use actix_web::{get, HttpResponse};
use crate::{
    core::errors::AppResult,
    domain::{
        dto::rbac::WhoAmIResponse,
        models::{auth::AuthenticatedUser, rbac::EffectivePermissions},
    },
};

/// 현재 토큰의 클레임으로 계산한 유효 권한
///
/// 저장소를 조회하지 않는 순수 투영이며 디버깅 용도입니다.
///
/// # Endpoint
/// `GET /api/v1/auth/whoami`
///
/// ```json
/// { "userId": 42, "email": "ada@example.com", "role": "admin",
///   "permissions": ["rbac.write"], "rolesVersion": 3 }
/// ```
#[get("/whoami")]
pub async fn whoami(user: AuthenticatedUser) -> AppResult<HttpResponse> {
    let snapshot = EffectivePermissions::resolve(&user)?;
    Ok(HttpResponse::Ok().json(WhoAmIResponse::from(snapshot)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, web, App};
    use chrono::Utc;
    use serde_json::json;
    use crate::domain::models::token::TokenClaims;
    use crate::middlewares::AuthMiddleware;
    use crate::services::auth::TokenService;

    fn bearer(tokens: &TokenService, sub: &str) -> String {
        let now = Utc::now().timestamp();
        let token = tokens
            .sign(&TokenClaims {
                sub: sub.to_string(),
                email: None,
                name: Some("Ada".to_string()),
                roles: vec!["auditor".to_string(), "user".to_string()],
                permissions: vec!["logs.read".to_string(), "audit.export".to_string()],
                roles_ver: Some(json!("2")),
                iat: now,
                exp: now + 600,
            })
            .unwrap();
        format!("Bearer {}", token)
    }

    macro_rules! whoami_app {
        ($tokens:expr) => {
            test::init_service(
                App::new().service(
                    web::scope("/api/v1/auth")
                        .wrap(AuthMiddleware::required().with_token_service($tokens.clone()))
                        .service(whoami),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_whoami_projects_claims() {
        let tokens = Arc::new(TokenService {});
        let app = whoami_app!(tokens);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/whoami")
            .insert_header(("Authorization", bearer(&tokens, "42")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "userId": 42,
                "email": "Ada",
                "role": "auditor",
                "permissions": ["audit.export", "logs.read"],
                "rolesVersion": 2
            })
        );
    }

    #[actix_web::test]
    async fn test_whoami_requires_numeric_authenticated_user() {
        let tokens = Arc::new(TokenService {});
        let app = whoami_app!(tokens);

        let req = test::TestRequest::get().uri("/api/v1/auth/whoami").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/whoami")
            .insert_header(("Authorization", bearer(&tokens, "ada")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
