//! # Redis 역할 버전 저장소
//!
//! 정수 키 하나에 역할 버전을 저장합니다. 초기화는 `SET NX`, 증가는 `INCRBY` 입니다.
//! 두 명령 모두 멱등하거나 원자적이므로 사이에서 요청이 취소되어도
//! 값이 어긋나지 않습니다.

use std::sync::Arc;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use redis::RedisError;
use crate::{
    caching::redis::RedisClient,
    config::{RbacConfig, INITIAL_ROLES_VERSION},
    core::{
        errors::{AppError, AppResult, ErrorContext},
        registry::ServiceLocator,
    },
    repositories::rbac::RolesVersionStore,
};

static REDIS_ROLES_VERSION_STORE_INSTANCE: OnceCell<Arc<RedisRolesVersionStore>> = OnceCell::new();

/// 저장소가 사용하는 정수 카운터 명령
#[async_trait]
pub trait VersionCounter: Send + Sync {
    async fn get_i64(&self, key: &str) -> Result<Option<i64>, RedisError>;

    /// 키가 없을 때만 설정. 실제로 설정했으면 `true`
    async fn set_nx_i64(&self, key: &str, value: i64) -> Result<bool, RedisError>;

    /// 증가 후 값을 반환
    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64, RedisError>;
}

#[async_trait]
impl VersionCounter for RedisClient {
    async fn get_i64(&self, key: &str) -> Result<Option<i64>, RedisError> {
        RedisClient::get_i64(self, key).await
    }

    async fn set_nx_i64(&self, key: &str, value: i64) -> Result<bool, RedisError> {
        RedisClient::set_nx_i64(self, key, value).await
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64, RedisError> {
        RedisClient::incr_by(self, key, delta).await
    }
}

pub struct RedisRolesVersionStore {
    counter: Arc<dyn VersionCounter>,
    key: String,
}

impl RedisRolesVersionStore {
    pub fn new(counter: Arc<dyn VersionCounter>, key: impl Into<String>) -> Self {
        Self {
            counter,
            key: key.into(),
        }
    }

    /// 싱글톤 인스턴스. `ServiceLocator` 에 `RedisClient` 가 등록되어 있어야 합니다.
    pub fn instance() -> Arc<Self> {
        REDIS_ROLES_VERSION_STORE_INSTANCE
            .get_or_init(|| {
                let redis: Arc<dyn VersionCounter> = ServiceLocator::get::<RedisClient>();
                Arc::new(Self::new(redis, RbacConfig::redis_key()))
            })
            .clone()
    }

    async fn seed_if_absent(&self) -> AppResult<()> {
        let created = self
            .counter
            .set_nx_i64(&self.key, INITIAL_ROLES_VERSION)
            .await
            .persistence_context("역할 버전 초기화 실패")?;

        if created {
            log::info!("🌱 역할 버전 초기화: {} = {}", self.key, INITIAL_ROLES_VERSION);
        }
        Ok(())
    }
}

#[async_trait]
impl RolesVersionStore for RedisRolesVersionStore {
    async fn current(&self) -> AppResult<i64> {
        self.seed_if_absent().await?;

        self.counter
            .get_i64(&self.key)
            .await
            .persistence_context("역할 버전 조회 실패")?
            .ok_or_else(|| AppError::PersistenceError(format!("{} 키가 존재하지 않습니다", self.key)))
    }

    async fn increment(&self) -> AppResult<i64> {
        self.seed_if_absent().await?;

        self.counter
            .incr_by(&self.key, 1)
            .await
            .persistence_context("역할 버전 증가 실패")
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
