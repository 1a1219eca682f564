//! 테스트용 메모리 저장소

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use actix_web::rt::task::yield_now;
use async_trait::async_trait;
use redis::{ErrorKind, RedisError};
use crate::{
    config::INITIAL_ROLES_VERSION,
    core::errors::{AppError, AppResult},
    domain::entities::rbac::AdminActionLog,
    repositories::rbac::{AdminActionSink, RolesVersionStore, VersionCounter},
};

/// 장애 주입이 가능한 메모리 역할 버전 저장소
pub struct InMemoryRolesVersionStore {
    version: Mutex<Option<i64>>,
    failing: AtomicBool,
}

impl InMemoryRolesVersionStore {
    /// 아직 초기화되지 않은 저장소
    pub fn empty() -> Self {
        Self {
            version: Mutex::new(None),
            failing: AtomicBool::new(false),
        }
    }

    pub fn with_version(version: i64) -> Self {
        Self {
            version: Mutex::new(Some(version)),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::PersistenceError("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RolesVersionStore for InMemoryRolesVersionStore {
    async fn current(&self) -> AppResult<i64> {
        self.check_available()?;
        let mut version = self.version.lock().unwrap();
        Ok(*version.get_or_insert(INITIAL_ROLES_VERSION))
    }

    async fn increment(&self) -> AppResult<i64> {
        self.check_available()?;
        let mut version = self.version.lock().unwrap();
        let next = version.unwrap_or(INITIAL_ROLES_VERSION) + 1;
        *version = Some(next);
        Ok(next)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Redis 명령 의미를 흉내 내는 메모리 카운터
///
/// 각 명령 앞에서 한 번 양보하므로 `join_all` 로 묶인 호출들이 명령 사이에서 섞입니다.
pub struct InMemoryCounter {
    values: Mutex<HashMap<String, i64>>,
    commands: Mutex<Vec<&'static str>>,
    failing: AtomicBool,
}

impl InMemoryCounter {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            commands: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn with_value(key: &str, value: i64) -> Self {
        let counter = Self::new();
        counter.values.lock().unwrap().insert(key.to_string(), value);
        counter
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn value(&self, key: &str) -> Option<i64> {
        self.values.lock().unwrap().get(key).copied()
    }

    /// 실행된 명령 이름 (순서대로)
    pub fn commands(&self) -> Vec<&'static str> {
        self.commands.lock().unwrap().clone()
    }

    async fn begin(&self, command: &'static str) -> Result<(), RedisError> {
        yield_now().await;
        if self.failing.load(Ordering::SeqCst) {
            return Err(RedisError::from((ErrorKind::IoError, "connection refused")));
        }
        self.commands.lock().unwrap().push(command);
        Ok(())
    }
}

#[async_trait]
impl VersionCounter for InMemoryCounter {
    async fn get_i64(&self, key: &str) -> Result<Option<i64>, RedisError> {
        self.begin("GET").await?;
        Ok(self.value(key))
    }

    async fn set_nx_i64(&self, key: &str, value: i64) -> Result<bool, RedisError> {
        self.begin("SETNX").await?;
        let mut values = self.values.lock().unwrap();
        if values.contains_key(key) {
            return Ok(false);
        }
        values.insert(key.to_string(), value);
        Ok(true)
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64, RedisError> {
        self.begin("INCRBY").await?;
        let mut values = self.values.lock().unwrap();
        let value = values.entry(key.to_string()).or_insert(0);
        *value += delta;
        Ok(*value)
    }
}

/// 기록된 감사 로그를 보관하는 sink. 앞의 `fail_times` 번은 실패합니다.
pub struct InMemoryAdminActionSink {
    entries: Mutex<Vec<AdminActionLog>>,
    fail_times: AtomicUsize,
    attempts: AtomicUsize,
}

impl InMemoryAdminActionSink {
    pub fn new() -> Self {
        Self::failing_first(0)
    }

    pub fn failing_first(fail_times: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            fail_times: AtomicUsize::new(fail_times),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn entries(&self) -> Vec<AdminActionLog> {
        self.entries.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdminActionSink for InMemoryAdminActionSink {
    async fn record(&self, entry: &AdminActionLog) -> AppResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_times.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("sink unavailable".to_string()));
        }

        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_memory_store_seeds_and_increments() {
        let store = InMemoryRolesVersionStore::empty();
        assert_eq!(store.current().await.unwrap(), INITIAL_ROLES_VERSION);
        assert_eq!(store.increment().await.unwrap(), INITIAL_ROLES_VERSION + 1);

        store.set_failing(true);
        assert!(matches!(store.current().await, Err(AppError::PersistenceError(_))));
    }
}
