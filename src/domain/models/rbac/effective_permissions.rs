//! 인증된 사용자의 유효 권한 투영 (WhoAmI)
//!
//! 토큰 클레임만으로 계산되는 순수 함수이며, 저장소를 조회하지 않습니다.

use std::collections::BTreeSet;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::AuthenticatedUser;

/// 클레임 기반 유효 권한 스냅샷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermissions {
    pub user_id: i64,
    /// 이메일 클레임, 없으면 이름 클레임, 둘 다 없으면 빈 문자열
    pub email: String,
    /// 첫 번째 역할, 없으면 빈 문자열
    pub role: String,
    pub permissions: BTreeSet<String>,
    /// 토큰의 역할 버전, 없거나 잘못된 값이면 0
    pub roles_version: i64,
}

impl EffectivePermissions {
    /// 사용자 ID가 숫자가 아니면 인증 실패로 처리합니다.
    pub fn resolve(user: &AuthenticatedUser) -> AppResult<Self> {
        let user_id = user.user_id.trim().parse::<i64>().map_err(|_| {
            AppError::AuthenticationError(format!(
                "사용자 식별자가 올바르지 않습니다: {}",
                user.user_id
            ))
        })?;

        let email = user
            .email
            .clone()
            .or_else(|| user.name.clone())
            .unwrap_or_default();

        let role = user.roles.first().cloned().unwrap_or_default();

        Ok(Self {
            user_id,
            email,
            role,
            permissions: user.permissions.iter().cloned().collect(),
            roles_version: user.roles_version.effective_version(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::rbac::RolesVersionClaim;
    use crate::domain::models::token::TokenClaims;

    fn principal() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "42".to_string(),
            email: Some("ada@example.com".to_string()),
            name: Some("Ada".to_string()),
            roles: vec!["admin".to_string(), "user".to_string()],
            permissions: vec![
                "users.read".to_string(),
                "rbac.write".to_string(),
                "users.read".to_string(),
            ],
            roles_version: RolesVersionClaim::Valid(3),
        }
    }

    #[test]
    fn test_resolve_full_claim_set() {
        let snapshot = EffectivePermissions::resolve(&principal()).unwrap();

        assert_eq!(snapshot.user_id, 42);
        assert_eq!(snapshot.email, "ada@example.com");
        assert_eq!(snapshot.role, "admin");
        assert_eq!(
            snapshot.permissions,
            BTreeSet::from(["rbac.write".to_string(), "users.read".to_string()])
        );
        assert_eq!(snapshot.roles_version, 3);
    }

    #[test]
    fn test_resolve_workflow_admin_claims() {
        let claims: TokenClaims = serde_json::from_value(serde_json::json!({
            "sub": "123",
            "email": "jane.doe@example.com",
            "roles": ["WorkflowAdmin"],
            "permissions": ["ConfigureRbac", "ViewRespondVerifs"],
            "roles_ver": "7",
            "iat": 0,
            "exp": 0
        }))
        .unwrap();

        let snapshot = EffectivePermissions::resolve(&AuthenticatedUser::from(claims)).unwrap();

        assert_eq!(
            snapshot,
            EffectivePermissions {
                user_id: 123,
                email: "jane.doe@example.com".to_string(),
                role: "WorkflowAdmin".to_string(),
                permissions: BTreeSet::from([
                    "ConfigureRbac".to_string(),
                    "ViewRespondVerifs".to_string(),
                ]),
                roles_version: 7,
            }
        );
    }

    #[test]
    fn test_missing_claims_fall_back() {
        let mut user = principal();
        user.email = None;
        user.roles.clear();
        user.permissions.clear();
        user.roles_version = RolesVersionClaim::Absent;

        let snapshot = EffectivePermissions::resolve(&user).unwrap();
        assert_eq!(snapshot.email, "Ada");
        assert_eq!(snapshot.role, "");
        assert!(snapshot.permissions.is_empty());
        assert_eq!(snapshot.roles_version, 0);

        user.name = None;
        user.roles_version = RolesVersionClaim::Malformed("x".to_string());
        let snapshot = EffectivePermissions::resolve(&user).unwrap();
        assert_eq!(snapshot.email, "");
        assert_eq!(snapshot.roles_version, 0);
    }

    #[test]
    fn test_non_numeric_user_id_is_rejected() {
        let mut user = principal();
        user.user_id = "ada".to_string();

        let result = EffectivePermissions::resolve(&user);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }
}
