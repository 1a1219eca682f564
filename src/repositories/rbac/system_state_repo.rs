//! # MongoDB 역할 버전 저장소
//!
//! `system_state` 컬렉션의 싱글톤 문서(`_id = 1`)에 역할 버전을 저장합니다.
//!
//! - 읽기는 `find_one` 입니다. 문서가 없을 때만 `$setOnInsert` upsert 로 초기값을 만듭니다.
//! - 증가는 파이프라인 `find_one_and_update` + `upsert` 한 번으로 처리되어
//!   문서가 없을 때의 초기화도 같은 명령 안에서 일어납니다.
//!
//! 동시 증가는 MongoDB 의 문서 단위 원자성으로 직렬화됩니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
};
use singleton_macro::repository;
use crate::{
    config::INITIAL_ROLES_VERSION,
    core::{
        errors::{AppError, AppResult, ErrorContext},
        registry::Repository,
    },
    db::Database,
    domain::entities::rbac::{SystemState, SYSTEM_STATE_ID},
    repositories::rbac::RolesVersionStore,
};

/// `system_state` 컬렉션 리포지토리
#[repository(name = "system_state", collection = "system_state")]
pub struct SystemStateRepository {
    db: Arc<Database>,
}

/// 싱글톤 문서 필터
pub fn system_state_filter() -> Document {
    doc! { "_id": SYSTEM_STATE_ID }
}

/// 문서가 없을 때만 초기값을 기록하는 업데이트. 기존 문서는 바꾸지 않습니다.
pub fn seed_update(seed: &SystemState) -> Document {
    doc! {
        "$setOnInsert": {
            "roles_version": seed.roles_version,
            "updated_at": seed.updated_at,
        }
    }
}

/// 버전을 1 올리는 파이프라인 업데이트
///
/// 필드가 없으면 초기값을 기준으로 올리므로, 새로 생성된 문서의 첫 값은 `초기값 + 1` 입니다.
pub fn increment_pipeline() -> Vec<Document> {
    vec![doc! {
        "$set": {
            "roles_version": {
                "$add": [
                    { "$ifNull": ["$roles_version", INITIAL_ROLES_VERSION] },
                    1_i64
                ]
            },
            "updated_at": "$$NOW",
        }
    }]
}

fn upsert_returning_after() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .upsert(true)
        .return_document(ReturnDocument::After)
        .build()
}

impl SystemStateRepository {
    /// 문서가 없을 때 초기값으로 생성하고 저장된 값을 반환합니다.
    ///
    /// 동시에 여러 요청이 생성해도 `$setOnInsert` 이므로 먼저 기록된 값이 유지됩니다.
    async fn seed(&self) -> AppResult<i64> {
        let state = self
            .collection::<SystemState>()
            .find_one_and_update(
                system_state_filter(),
                seed_update(&SystemState::new(INITIAL_ROLES_VERSION)),
            )
            .with_options(upsert_returning_after())
            .await
            .persistence_context("역할 버전 초기화 실패")?;

        let version = state
            .map(|s| s.roles_version)
            .ok_or_else(|| AppError::PersistenceError("system_state 문서를 읽을 수 없습니다".to_string()))?;

        log::info!("🌱 역할 버전 초기화: {}", version);
        Ok(version)
    }
}

#[async_trait]
impl RolesVersionStore for SystemStateRepository {
    async fn current(&self) -> AppResult<i64> {
        let state = self
            .collection::<SystemState>()
            .find_one(system_state_filter())
            .await
            .persistence_context("역할 버전 조회 실패")?;

        match state {
            Some(state) => Ok(state.roles_version),
            None => self.seed().await,
        }
    }

    async fn increment(&self) -> AppResult<i64> {
        let state = self
            .collection::<SystemState>()
            .find_one_and_update(system_state_filter(), increment_pipeline())
            .with_options(upsert_returning_after())
            .await
            .persistence_context("역할 버전 증가 실패")?;

        state
            .map(|s| s.roles_version)
            .ok_or_else(|| AppError::PersistenceError("증가된 역할 버전을 읽을 수 없습니다".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "mongo"
    }
}
