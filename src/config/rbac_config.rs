//! 역할 버전(roles version) 관련 설정
//!
//! 버전 저장소 백엔드 선택, 가드의 저장소 장애 정책, 감사 로그 재시도 횟수를 관리합니다.
//!
//! ```bash
//! export ROLES_VERSION_STORE="mongo"            # mongo | redis
//! export ROLES_VERSION_FAILURE_POLICY="closed"  # open | closed
//! export ROLES_VERSION_REDIS_KEY="rbac:roles_version"
//! export AUDIT_LOG_MAX_ATTEMPTS="3"
//! ```

use std::env;
use std::fmt;

/// 저장소가 비어 있을 때 생성되는 초기 역할 버전
///
/// 잘못된 `roles_ver` 클레임은 0으로 취급되므로, 초기값이 1이면
/// 그런 토큰은 항상 오래된 것으로 판정됩니다.
pub const INITIAL_ROLES_VERSION: i64 = 1;

/// 역할 버전 저장소 백엔드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStoreBackend {
    /// MongoDB `system_state` 컬렉션의 싱글톤 문서
    Mongo,
    /// Redis 정수 키 (`INCR`)
    Redis,
}

impl VersionStoreBackend {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(VersionStoreBackend::Mongo),
            "redis" => Ok(VersionStoreBackend::Redis),
            other => Err(format!("Unsupported roles version store: {}", other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStoreBackend::Mongo => "mongo",
            VersionStoreBackend::Redis => "redis",
        }
    }
}

/// 가드가 현재 역할 버전을 읽지 못했을 때의 처리 정책
///
/// 기본 동작이 아니라 배포 시 명시적으로 결정해야 하는 값입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheckFailurePolicy {
    /// 요청을 통과시키고 경고 로그를 남김
    FailOpen,
    /// 요청을 503으로 거부
    FailClosed,
}

impl VersionCheckFailurePolicy {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "open" | "fail-open" | "fail_open" => Ok(VersionCheckFailurePolicy::FailOpen),
            "closed" | "fail-closed" | "fail_closed" => Ok(VersionCheckFailurePolicy::FailClosed),
            other => Err(format!("Unsupported failure policy: {}", other)),
        }
    }
}

impl fmt::Display for VersionCheckFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionCheckFailurePolicy::FailOpen => f.write_str("fail-open"),
            VersionCheckFailurePolicy::FailClosed => f.write_str("fail-closed"),
        }
    }
}

/// 역할 버전 설정
pub struct RbacConfig;

impl RbacConfig {
    /// 사용할 역할 버전 저장소. 기본값: MongoDB
    ///
    /// 알 수 없는 값이면 에러 로그를 남기고 MongoDB를 사용합니다.
    pub fn store_backend() -> VersionStoreBackend {
        match env::var("ROLES_VERSION_STORE") {
            Ok(raw) => VersionStoreBackend::from_str(&raw).unwrap_or_else(|e| {
                log::error!("{}. MongoDB 저장소를 사용합니다", e);
                VersionStoreBackend::Mongo
            }),
            Err(_) => VersionStoreBackend::Mongo,
        }
    }

    /// 저장소 장애 시 가드 정책
    ///
    /// 기본값이 없습니다. 설정되지 않았거나 잘못된 값이면 에러를 반환하며,
    /// `main` 은 이 경우 서버를 시작하지 않습니다.
    pub fn failure_policy() -> Result<VersionCheckFailurePolicy, String> {
        Self::resolve_failure_policy(env::var("ROLES_VERSION_FAILURE_POLICY").ok().as_deref())
    }

    fn resolve_failure_policy(raw: Option<&str>) -> Result<VersionCheckFailurePolicy, String> {
        let policy = match raw {
            Some(raw) => VersionCheckFailurePolicy::from_str(raw),
            None => Err("ROLES_VERSION_FAILURE_POLICY 가 설정되지 않았습니다 (open | closed)".to_string()),
        };

        if let Err(e) = &policy {
            log::error!("❌ {}", e);
        }
        policy
    }

    /// Redis 저장소에서 사용할 키. 기본값: "rbac:roles_version"
    pub fn redis_key() -> String {
        env::var("ROLES_VERSION_REDIS_KEY").unwrap_or_else(|_| "rbac:roles_version".to_string())
    }

    /// 감사 로그 기록 최대 시도 횟수 (최소 1). 기본값: 3
    pub fn audit_log_max_attempts() -> u32 {
        env::var("AUDIT_LOG_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3)
            .max(1)
    }
}
