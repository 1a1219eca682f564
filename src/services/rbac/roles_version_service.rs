//! # 역할 버전 서비스
//!
//! 시스템 전역 역할 버전(roles version)의 조회와 증가를 담당합니다.
//! 역할/권한 할당이 바뀔 때 버전을 올리면, 그 이전에 발급된 모든 액세스 토큰은
//! 만료 전이라도 다음 요청에서 거부됩니다.
//!
//! ## 보장 사항
//!
//! - 버전은 감소하지 않습니다.
//! - 동시 `bump` N 건은 `v0+1 ..= v0+N` 을 하나씩 나눠 받습니다.
//! - 값은 요청 간에 메모리에 캐싱하지 않습니다. 매 조회가 저장소를 읽습니다.

use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::{
    config::{RbacConfig, VersionStoreBackend},
    core::errors::AppResult,
    repositories::rbac::{SystemStateRepository, RedisRolesVersionStore, RolesVersionStore},
};

static ROLES_VERSION_SERVICE_INSTANCE: OnceCell<Arc<RolesVersionService>> = OnceCell::new();

/// 역할 버전 서비스
pub struct RolesVersionService {
    store: Arc<dyn RolesVersionStore>,
}

impl RolesVersionService {
    pub fn new(store: Arc<dyn RolesVersionStore>) -> Self {
        Self { store }
    }

    /// `ROLES_VERSION_STORE` 설정에 따라 저장소를 선택한 싱글톤 인스턴스
    pub fn instance() -> Arc<Self> {
        ROLES_VERSION_SERVICE_INSTANCE
            .get_or_init(|| {
                let store: Arc<dyn RolesVersionStore> = match RbacConfig::store_backend() {
                    VersionStoreBackend::Mongo => SystemStateRepository::instance(),
                    VersionStoreBackend::Redis => RedisRolesVersionStore::instance(),
                };
                log::info!("🔢 역할 버전 저장소: {}", store.backend_name());
                Arc::new(Self::new(store))
            })
            .clone()
    }

    /// 현재 역할 버전을 반환합니다.
    ///
    /// 저장소에 값이 없으면 초기값으로 생성됩니다.
    /// 저장소를 사용할 수 없으면 `AppError::PersistenceError`.
    pub async fn get(&self) -> AppResult<i64> {
        self.store.current().await.map_err(|e| {
            log::error!("❌ 역할 버전 조회 실패: {}", e);
            e
        })
    }

    /// 역할 버전을 1 올리고 새 값을 반환합니다.
    ///
    /// 실패하면 버전은 바뀌지 않은 상태입니다.
    pub async fn bump(&self) -> AppResult<i64> {
        match self.store.increment().await {
            Ok(version) => {
                log::info!("🔄 역할 버전 증가: {} (이전 토큰 무효화)", version);
                Ok(version)
            }
            Err(e) => {
                log::error!("❌ 역할 버전 증가 실패: {}", e);
                Err(e)
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }
}

fn roles_version_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(RolesVersionService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "roles_version_service",
        constructor: roles_version_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use futures_util::future::join_all;
    use crate::config::INITIAL_ROLES_VERSION;
    use crate::core::errors::AppError;
    use crate::repositories::rbac::in_memory::InMemoryRolesVersionStore;

    fn service_with(store: InMemoryRolesVersionStore) -> (RolesVersionService, Arc<InMemoryRolesVersionStore>) {
        let store = Arc::new(store);
        (RolesVersionService::new(store.clone()), store)
    }

    #[actix_web::test]
    async fn test_get_seeds_initial_version() {
        let (service, _) = service_with(InMemoryRolesVersionStore::empty());
        assert_eq!(service.get().await.unwrap(), INITIAL_ROLES_VERSION);
    }

    #[actix_web::test]
    async fn test_get_is_stable_without_bump() {
        let (service, _) = service_with(InMemoryRolesVersionStore::with_version(4));
        assert_eq!(service.get().await.unwrap(), 4);
        assert_eq!(service.get().await.unwrap(), 4);
    }

    #[actix_web::test]
    async fn test_get_after_bump_is_at_least_bumped_value() {
        let (service, _) = service_with(InMemoryRolesVersionStore::with_version(3));
        let bumped = service.bump().await.unwrap();

        assert_eq!(bumped, 4);
        assert!(service.get().await.unwrap() >= bumped);
    }

    #[actix_web::test]
    async fn test_concurrent_bumps_receive_distinct_consecutive_versions() {
        let (service, _) = service_with(InMemoryRolesVersionStore::with_version(10));
        let service = Arc::new(service);

        let bumps = (0..25).map(|_| {
            let service = service.clone();
            async move { service.bump().await.unwrap() }
        });
        let results: BTreeSet<i64> = join_all(bumps).await.into_iter().collect();

        assert_eq!(results, (11..=35).collect::<BTreeSet<i64>>());
        assert_eq!(service.get().await.unwrap(), 35);
    }

    #[actix_web::test]
    async fn test_store_failure_propagates_and_keeps_version() {
        let (service, store) = service_with(InMemoryRolesVersionStore::with_version(2));

        store.set_failing(true);
        assert!(matches!(service.bump().await, Err(AppError::PersistenceError(_))));
        assert!(matches!(service.get().await, Err(AppError::PersistenceError(_))));

        store.set_failing(false);
        assert_eq!(service.get().await.unwrap(), 2);
    }
}
