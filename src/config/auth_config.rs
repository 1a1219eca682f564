//! # Authentication Configuration Module
//!
//! JWT 서명/검증과 관리자 인가 정책 관련 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="1"
//! export ADMIN_ROLE="admin"
//! ```

use std::env;

/// JWT 토큰 설정
///
/// 토큰 발급 자체는 외부 인증 서버의 책임이지만, 이 서비스는 같은 비밀키로
/// 서명을 검증하고 `roles_ver` 클레임을 담은 토큰을 재발급할 수 있어야 합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// # 기본값
    ///
    /// 환경 변수가 설정되지 않은 경우 "your-secret-key"를 사용하지만,
    /// 이는 개발 환경에서만 안전하며 경고 로그가 출력됩니다.
    ///
    /// ```bash
    /// # 안전한 JWT 키 생성
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// JWT 액세스 토큰의 만료 시간을 시간 단위로 반환합니다. 기본값: 1시간
    ///
    /// 역할 버전이 올라가면 만료 전이라도 토큰은 거부되지만,
    /// 짧은 만료는 여전히 탈취 토큰의 수명을 줄입니다.
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .unwrap_or(1)
    }
}

/// 관리자 인가 정책 설정
pub struct AdminPolicyConfig;

impl AdminPolicyConfig {
    /// 관리자 엔드포인트에 필요한 역할 이름. 기본값: "admin"
    pub fn admin_role() -> String {
        env::var("ADMIN_ROLE").unwrap_or_else(|_| "admin".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_defaults_when_unset() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 1);
        }
        if env::var("JWT_SECRET").is_err() {
            assert_eq!(JwtConfig::secret(), "your-secret-key");
        }
    }

    #[test]
    fn test_admin_role_default() {
        if env::var("ADMIN_ROLE").is_err() {
            assert_eq!(AdminPolicyConfig::admin_role(), "admin");
        }
    }
}
