//! JWT 토큰 서비스 구현
//!
//! HMAC-SHA256 서명 토큰을 발급하고 검증합니다.
//! 비밀키와 만료 시간은 호출 시점의 [`JwtConfig`] 에서 읽습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::{
    config::JwtConfig,
    core::errors::{AppError, AppResult},
    domain::models::{auth::AuthenticatedUser, token::TokenClaims},
};

/// JWT 토큰 서비스
///
/// ```rust,ignore
/// let token_service = TokenService::instance();
/// let claims = token_service.verify_token(token)?;
/// ```
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 액세스 토큰 발급
    ///
    /// `principal` 의 기존 `roles_version` 은 무시하고 전달받은 `roles_version`
    /// (보통 현재 저장소 값)을 `roles_ver` 클레임으로 기록합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    pub fn issue_access_token(
        &self,
        principal: &AuthenticatedUser,
        roles_version: i64,
    ) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now + Duration::hours(JwtConfig::expiration_hours());

        let claims = TokenClaims {
            sub: principal.user_id.clone(),
            email: principal.email.clone(),
            name: principal.name.clone(),
            roles: principal.roles.clone(),
            permissions: principal.permissions.clone(),
            roles_ver: Some(serde_json::Value::String(roles_version.to_string())),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        self.sign(&claims)
    }

    /// 주어진 클레임 그대로 서명합니다.
    pub fn sign(&self, claims: &TokenClaims) -> AppResult<String> {
        let secret = JwtConfig::secret();
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());

        encode(&Header::default(), claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 서명과 만료를 검증하고 클레임을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 잘못된 형식, 서명 불일치
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                ErrorKind::InvalidSignature => {
                    AppError::AuthenticationError("토큰 서명이 올바르지 않습니다".to_string())
                }
                _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    /// `Authorization: Bearer {token}` 헤더에서 토큰 부분을 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }
}
