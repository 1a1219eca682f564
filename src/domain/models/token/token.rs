//! JWT 클레임 모델

use serde::{Deserialize, Serialize};

/// 액세스 토큰 클레임
///
/// `roles_ver` 는 발급 시점의 역할 버전이며 문자열로 인코딩된 정수입니다.
/// 숫자, 불리언 등 어떤 JSON 값이 와도 역직렬화는 성공해야 하므로 값 그대로 보관하고,
/// 해석은 [`RolesVersionClaim`](crate::domain::models::rbac::RolesVersionClaim) 이 담당합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 식별자 (숫자 문자열)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles_ver: Option<serde_json::Value>,
    pub iat: i64,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_without_optional_fields_deserialize() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"sub":"42","iat":1,"exp":2}"#).unwrap();

        assert_eq!(claims.sub, "42");
        assert!(claims.roles.is_empty());
        assert!(claims.permissions.is_empty());
        assert!(claims.roles_ver.is_none());
    }

    #[test]
    fn test_non_string_roles_ver_still_deserializes() {
        let numeric: TokenClaims =
            serde_json::from_str(r#"{"sub":"42","roles_ver":2,"iat":1,"exp":2}"#).unwrap();
        assert_eq!(numeric.roles_ver, Some(serde_json::json!(2)));

        let nested: TokenClaims =
            serde_json::from_str(r#"{"sub":"42","roles_ver":{"v":2},"iat":1,"exp":2}"#).unwrap();
        assert!(nested.roles_ver.is_some());

        let null: TokenClaims =
            serde_json::from_str(r#"{"sub":"42","roles_ver":null,"iat":1,"exp":2}"#).unwrap();
        assert!(null.roles_ver.is_none());
    }

    #[test]
    fn test_roles_ver_is_string_encoded() {
        let claims = TokenClaims {
            sub: "1".to_string(),
            email: None,
            name: None,
            roles: vec![],
            permissions: vec![],
            roles_ver: Some(serde_json::json!("3")),
            iat: 0,
            exp: 0,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["roles_ver"], serde_json::json!("3"));
        assert!(json.get("email").is_none());
    }
}
