//! 역할 버전 관련 응답 DTO

use serde::{Deserialize, Serialize};
use crate::domain::models::rbac::EffectivePermissions;

/// `GET /api/v1/admin/rbac/version`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesVersionResponse {
    pub version: i64,
}

/// `POST /api/v1/admin/rbac/invalidate-tokens`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidateTokensResponse {
    pub version: i64,
    pub message: String,
}

impl InvalidateTokensResponse {
    pub fn new(version: i64) -> Self {
        Self {
            version,
            message: format!(
                "Roles version bumped to {}. Previously issued tokens are now stale and must be re-issued.",
                version
            ),
        }
    }
}

/// `GET /api/v1/auth/whoami`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub user_id: i64,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub roles_version: i64,
}

impl From<EffectivePermissions> for WhoAmIResponse {
    fn from(snapshot: EffectivePermissions) -> Self {
        Self {
            user_id: snapshot.user_id,
            email: snapshot.email,
            role: snapshot.role,
            permissions: snapshot.permissions.into_iter().collect(),
            roles_version: snapshot.roles_version,
        }
    }
}
