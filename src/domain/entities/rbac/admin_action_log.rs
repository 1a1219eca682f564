//! AdminActionLog Entity
//!
//! 관리자 작업 감사 로그입니다. 역할 버전 증가(토큰 일괄 무효화) 시
//! `RoleUpdate` / `RBAC` 항목이 기록됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 관리자 작업 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminActionKind {
    /// 역할/권한 할당 변경 (역할 버전 증가)
    RoleUpdate,
}

impl fmt::Display for AdminActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminActionKind::RoleUpdate => f.write_str("RoleUpdate"),
        }
    }
}

/// 감사 로그 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub action: AdminActionKind,
    /// 작업 대상 (예: "RBAC")
    pub target: String,
    /// 작업 결과로 생성된 역할 버전
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles_version: Option<i64>,
    pub message: String,
    /// 작업을 수행한 관리자 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_user_id: Option<String>,
    /// 애플리케이션 로그와 감사 로그를 연결하는 식별자
    pub correlation_id: String,
    pub created_at: DateTime,
}

impl AdminActionLog {
    /// 역할 버전 증가에 대한 감사 로그 항목 생성
    pub fn role_update(
        roles_version: i64,
        message: impl Into<String>,
        actor_user_id: Option<String>,
    ) -> Self {
        Self {
            id: None,
            action: AdminActionKind::RoleUpdate,
            target: "RBAC".to_string(),
            roles_version: Some(roles_version),
            message: message.into(),
            actor_user_id,
            correlation_id: uuid::Uuid::new_v4().to_string(),
            created_at: DateTime::now(),
        }
    }
}
