//! # Application Error Handling System
//!
//! 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고 `actix_web::ResponseError`를 구현하여
//! 모든 에러가 일관된 JSON 응답으로 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패 |
//! | `AuthenticationError` | 401 Unauthorized | 인증 실패, 잘못된 식별자 클레임 |
//! | `AuthorizationError` | 403 Forbidden | 관리자 권한 부족 |
//! | `PersistenceError` | 503 Service Unavailable | 역할 버전 저장소 읽기/쓰기 실패 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 오래된(stale) 세션은 에러가 아닙니다. 가드가 정상적인 제어 흐름으로 401을
//! 응답하며 이 타입을 거치지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn current_version(service: &RolesVersionService) -> AppResult<i64> {
//!     // 저장소 장애는 PersistenceError 로 전파됩니다
//!     service.get().await
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// ## 에러 카테고리
///
/// ### 1. 인프라 계층 에러
/// - `PersistenceError`: 역할 버전 저장소(MongoDB/Redis)를 사용할 수 없음
/// - `DatabaseError`: 일반 MongoDB 작업 오류 (감사 로그 등)
///
/// ### 2. 요청 계층 에러
/// - `ValidationError`: 요청 본문 검증 실패
///
/// ### 3. 보안 계층 에러
/// - `AuthenticationError`: 토큰 없음/만료/위조, 숫자가 아닌 사용자 ID
/// - `AuthorizationError`: 관리자 정책 불충족
#[derive(Error, Debug)]
pub enum AppError {
    /// 역할 버전 저장소 장애 (503 Service Unavailable)
    ///
    /// `get`/`bump` 가 저장소에 도달하지 못했을 때 발생합니다.
    /// 증가 연산은 단일 원자적 명령이므로 이 에러가 나면 버전은 변하지 않은 상태입니다.
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어갈 기계 판독용 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::PersistenceError(_) => "persistence_unavailable",
            AppError::DatabaseError(_) => "database_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::AuthenticationError(_) => "authentication_required",
            AppError::AuthorizationError(_) => "insufficient_permissions",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::PersistenceError(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.code(),
                "message": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 저장소 계층 에러를 `PersistenceError`로 변환합니다.
    fn persistence_context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn persistence_context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::PersistenceError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("reason is too long".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("admin role required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_persistence_error_is_5xx() {
        let error = AppError::PersistenceError("connection refused".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.status().is_server_error());
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_persistence_context_maps_to_persistence_error() {
        let result: Result<i64, &str> = Err("server selection timeout");
        let app_result = result.persistence_context("roles version read failed");

        match app_result {
            Err(AppError::PersistenceError(msg)) => {
                assert!(msg.contains("roles version read failed"));
                assert!(msg.contains("server selection timeout"));
            }
            other => panic!("Expected PersistenceError, got {:?}", other),
        }
    }
}
