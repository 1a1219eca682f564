//! # Service Registry - 싱글톤 의존성 주입 컨테이너
//!
//! 인프라 컴포넌트(`Database`, `RedisClient`)와 서비스/리포지토리 싱글톤을 보관하는
//! 전역 컨테이너입니다. Spring의 `ApplicationContext`처럼 동작합니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 런타임 초기화 (Infrastructure Beans)
//!    ├─ Database, RedisClient 직접 생성
//!    └─ ServiceLocator::set() → 전역 컨테이너에 저장
//!
//! 2. 컴포넌트 등록 (Component Scanning)
//!    ├─ #[service] / #[repository] 매크로 → ServiceRegistration / RepositoryRegistration
//!    ├─ 설정에 따라 구성이 달라지는 서비스는 inventory::submit! 으로 직접 등록
//!    └─ ServiceLocator::initialize_all() → 모든 싱글톤을 미리 생성
//!
//! 3. 조회
//!    ├─ ServiceLocator::get::<T>() → TypeId 기반 O(1) 조회
//!    └─ 캐시에 없으면 타입 이름으로 등록 정보를 찾아 지연 생성
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! #[repository(name = "system_state", collection = "system_state")]
//! pub struct SystemStateRepository {
//!     db: Arc<Database>,
//! }
//!
//! #[service(name = "token")]
//! pub struct TokenService {}
//!
//! let repo = SystemStateRepository::instance();
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// `#[service]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리에서 서비스를 식별하는 이름
    fn name(&self) -> &str;

    /// 서비스가 처음 생성된 후 호출되는 초기화 로직
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// `#[repository]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름 (매크로의 `collection` 인자)
    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
///
/// `#[service]` 매크로가 생성하거나 서비스 모듈에서 `inventory::submit!` 으로 제출합니다.
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
///
/// `#[repository]` 매크로에 의해 생성됩니다.
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 서비스 이름 → 등록정보 매핑 캐시
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    log::debug!("🗂️ Service cache initialized: {} entries", cache.len());
    cache
});

/// 리포지토리 이름 → 등록정보 매핑 캐시
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    log::debug!("🗂️ Repository cache initialized: {} entries", cache.len());
    cache
});

/// 등록 이름을 타입 이름과 비교 가능한 키로 정규화합니다.
///
/// `roles_version_service` → `rolesversion`, `system_state` → `systemstate`
fn normalize_registration_name(name: &str) -> String {
    let trimmed = name
        .strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name);

    trimmed.replace('_', "").to_lowercase()
}

/// 생성자가 돌려준 값에서 `Arc<T>` 를 꺼냅니다.
///
/// 매크로 생성자는 `Box<Arc<T>>`, 수동 등록 생성자는 `Box<Arc<dyn Any>>` 를 돌려줍니다.
fn downcast_constructed<T: 'static + Send + Sync>(boxed: Box<dyn Any + Send + Sync>) -> Option<Arc<T>> {
    match boxed.downcast::<Arc<T>>() {
        Ok(instance) => Some(*instance),
        Err(boxed) => boxed
            .downcast::<Arc<dyn Any + Send + Sync>>()
            .ok()
            .and_then(|instance| (*instance).downcast::<T>().ok()),
    }
}

/// 싱글톤 의존성 주입 컨테이너
///
/// - **싱글톤 보장**: 각 타입당 정확히 하나의 인스턴스만 보관
/// - **지연 초기화**: 등록된 컴포넌트는 첫 요청 시점에 생성
/// - **Thread-safe**: `RwLock` 으로 동시 접근 보호
/// - **순환 참조 방지**: 생성 중인 타입을 추적
pub struct ServiceLocator {
    /// `TypeId` 를 키로 하는 인스턴스 캐시
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// 현재 생성 중인 타입들
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 외부에서 생성된 인스턴스를 등록합니다.
    ///
    /// 매크로로 관리되지 않는 인프라 컴포넌트(Database, RedisClient 등)를
    /// 수동으로 등록할 때 사용합니다. 같은 타입을 다시 등록하면 교체됩니다.
    ///
    /// ```rust,ignore
    /// let database = Arc::new(Database::new().await?);
    /// ServiceLocator::set(database);
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        log::info!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 이미 보관 중인 인스턴스를 조회합니다. 없으면 `None`.
    ///
    /// 등록 정보로부터 새로 생성하지 않습니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        instances
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 보관 중인 인스턴스가 없으면 타입 이름(`XxxService`, `XxxRepository`)으로
    /// 등록 정보를 찾아 생성한 뒤 보관합니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입이거나 순환 참조가 감지되면 패닉이 발생합니다.
    /// 인프라 컴포넌트 등록 누락은 시작 시점에 바로 드러나야 하는 배선 오류입니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        if let Some(instance) = Self::try_get::<T>() {
            return instance;
        }

        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        {
            let mut initializing = LOCATOR
                .initializing
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !initializing.insert(type_id) {
                log::error!("❌ Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let created = Self::construct::<T>();

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&type_id);

        match created {
            Some(instance) => {
                let mut instances = LOCATOR
                    .instances
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());

                // 동시에 생성된 경우 먼저 보관된 인스턴스를 유지
                let kept = instances
                    .entry(type_id)
                    .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>)
                    .clone();

                match kept.downcast::<T>() {
                    Ok(instance) => instance,
                    Err(_) => panic!("Type mismatch in ServiceLocator: {}", type_name),
                }
            }
            None => {
                log::error!("❌ Service not found: {}", type_name);
                panic!(
                    "Service not found: {}. Make sure it's registered with #[service] or #[repository] macro, or manually registered with ServiceLocator::set()",
                    type_name
                );
            }
        }
    }

    /// 타입 이름으로 등록 정보를 찾아 인스턴스를 생성합니다.
    fn construct<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let clean_type_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        let constructor = if let Some(entity) = clean_type_name.strip_suffix("Repository") {
            REPOSITORY_NAME_CACHE
                .get(&entity.to_lowercase())
                .map(|registration| registration.constructor)
        } else if let Some(entity) = clean_type_name.strip_suffix("Service") {
            SERVICE_NAME_CACHE
                .get(&entity.to_lowercase())
                .map(|registration| registration.constructor)
        } else {
            None
        }?;

        downcast_constructed::<T>(constructor())
    }

    /// 모든 등록된 리포지토리와 서비스 싱글톤을 미리 생성합니다.
    ///
    /// 첫 요청 시점이 아니라 시작 시점에 배선 오류가 드러나도록
    /// `main` 에서 인프라 등록 직후 호출합니다. 리포지토리가 먼저 생성됩니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        log::info!("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        for registration in repo_registrations {
            log::debug!("  • {} Creating...", registration.name);
            let _instance = (registration.constructor)();
            log::info!("  • {} ✓ Created", registration.name);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        for registration in service_registrations {
            log::debug!("  • {} Creating...", registration.name);
            let _instance = (registration.constructor)();
            log::info!("  • {} ✓ Created", registration.name);
        }

        log::info!(
            "✅ {} repository(ies), {} service(s) initialized",
            repo_count,
            service_count
        );
        Ok(())
    }

    /// `std::any::type_name` 결과에서 모듈 경로를 제거합니다.
    ///
    /// `rbac_version_service::db::Database` → `Database`
    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }
}

/// 전역 서비스 로케이터 인스턴스
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
