//! # 관리자 작업 감사 로그 리포지토리
//!
//! `admin_action_logs` 컬렉션에 감사 로그를 추가 전용으로 기록합니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, IndexModel};
use singleton_macro::repository;
use crate::{
    core::{
        errors::{AppError, AppResult},
        registry::Repository,
    },
    db::Database,
    domain::entities::rbac::AdminActionLog,
};

/// 감사 로그 기록 대상
#[async_trait]
pub trait AdminActionSink: Send + Sync {
    async fn record(&self, entry: &AdminActionLog) -> AppResult<()>;
}

#[repository(name = "admin_action", collection = "admin_action_logs")]
pub struct AdminActionRepository {
    db: Arc<Database>,
}

impl AdminActionRepository {
    /// 조회용 인덱스 생성
    ///
    /// - `created_at` 내림차순: 최근 작업 조회
    /// - `action` + `created_at`: 작업 종류별 이력
    /// - `correlation_id`: 애플리케이션 로그와의 대조
    pub async fn create_indexes(&self) -> AppResult<()> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        let action_index = IndexModel::builder()
            .keys(doc! { "action": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("action_created_at".to_string())
                .build())
            .build();

        let correlation_index = IndexModel::builder()
            .keys(doc! { "correlation_id": 1 })
            .options(IndexOptions::builder()
                .name("correlation_id".to_string())
                .build())
            .build();

        self.collection::<AdminActionLog>()
            .create_indexes([created_at_index, action_index, correlation_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl AdminActionSink for AdminActionRepository {
    async fn record(&self, entry: &AdminActionLog) -> AppResult<()> {
        self.collection::<AdminActionLog>()
            .insert_one(entry)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
