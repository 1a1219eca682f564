//! 인증 미들웨어 정책

use crate::domain::models::auth::AuthenticatedUser;

/// 인증 필수 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 유효한 토큰이 없으면 401
    Required,
    /// 토큰이 없거나 유효하지 않으면 익명으로 통과
    Optional,
}

/// 엔드포인트가 요구하는 역할
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredRole {
    Single(String),
    /// 나열된 역할 중 하나
    Any(Vec<String>),
}

impl RequiredRole {
    pub fn is_satisfied_by(&self, user: &AuthenticatedUser) -> bool {
        match self {
            RequiredRole::Single(role) => user.has_role(role),
            RequiredRole::Any(roles) => roles.iter().any(|role| user.has_role(role)),
        }
    }

    /// 로그와 403 메시지에 쓰이는 표현
    pub fn describe(&self) -> String {
        match self {
            RequiredRole::Single(role) => role.clone(),
            RequiredRole::Any(roles) => roles.join(" | "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::rbac::RolesVersionClaim;

    fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "1".to_string(),
            email: None,
            name: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            permissions: vec![],
            roles_version: RolesVersionClaim::Absent,
        }
    }

    #[test]
    fn test_required_role() {
        let admin = RequiredRole::Single("admin".to_string());
        assert!(admin.is_satisfied_by(&user_with_roles(&["admin"])));
        assert!(!admin.is_satisfied_by(&user_with_roles(&["user"])));

        let any = RequiredRole::Any(vec!["admin".to_string(), "operator".to_string()]);
        assert!(any.is_satisfied_by(&user_with_roles(&["operator"])));
        assert!(!any.is_satisfied_by(&user_with_roles(&[])));
        assert_eq!(any.describe(), "admin | operator");
    }
}
