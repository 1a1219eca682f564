//! SystemState Entity
//!
//! 시스템 전역 역할 버전을 담는 싱글톤 문서입니다.
//! 컬렉션에는 `_id = 1` 인 문서 하나만 존재하며, 처음 읽힐 때 초기값으로 생성됩니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 싱글톤 문서의 고정 식별자
pub const SYSTEM_STATE_ID: i32 = 1;

/// 역할 버전 싱글톤 문서
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemState {
    #[serde(rename = "_id")]
    pub id: i32,
    /// 현재 역할 버전 (단조 증가, 감소하지 않음)
    pub roles_version: i64,
    /// 마지막 변경 시간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl SystemState {
    pub fn new(roles_version: i64) -> Self {
        Self {
            id: SYSTEM_STATE_ID,
            roles_version,
            updated_at: Some(DateTime::now()),
        }
    }
}
