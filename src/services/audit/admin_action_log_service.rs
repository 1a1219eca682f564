//! # 관리자 작업 감사 로그 서비스
//!
//! 감사 로그는 HTTP 응답과 분리된 작업으로 기록됩니다. 기록 실패는
//! 이미 끝난 역할 버전 증가 결과에 영향을 주지 않으며, 제한된 횟수만큼
//! 재시도한 뒤 에러 로그만 남깁니다.

use std::sync::Arc;
use std::time::Duration;
use actix_web::rt::{self, task::JoinHandle};
use once_cell::sync::OnceCell;
use crate::{
    config::RbacConfig,
    domain::entities::rbac::AdminActionLog,
    repositories::rbac::{AdminActionRepository, AdminActionSink},
};

static ADMIN_ACTION_LOG_SERVICE_INSTANCE: OnceCell<Arc<AdminActionLogService>> = OnceCell::new();

/// 재시도 간격의 기준값. n 번째 실패 후 `n * RETRY_BASE_DELAY` 만큼 대기
const RETRY_BASE_DELAY: Duration = Duration::from_millis(200);

pub struct AdminActionLogService {
    sink: Arc<dyn AdminActionSink>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl AdminActionLogService {
    pub fn new(sink: Arc<dyn AdminActionSink>, max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            sink,
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    pub fn instance() -> Arc<Self> {
        ADMIN_ACTION_LOG_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    AdminActionRepository::instance(),
                    RbacConfig::audit_log_max_attempts(),
                    RETRY_BASE_DELAY,
                ))
            })
            .clone()
    }

    /// 역할 버전 증가를 감사 로그로 남깁니다. 응답을 기다리지 않습니다.
    ///
    /// `reason` 이 있으면 메시지 끝에 덧붙입니다.
    pub fn log_roles_version_bump(
        &self,
        version: i64,
        reason: Option<&str>,
        actor_user_id: Option<String>,
    ) -> JoinHandle<()> {
        let mut message = format!(
            "Roles version bumped to {}; all previously issued access tokens are stale",
            version
        );
        if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
            message.push_str(&format!(" (reason: {})", reason));
        }

        self.log_detached(AdminActionLog::role_update(version, message, actor_user_id))
    }

    /// 감사 로그를 별도 작업으로 기록합니다.
    ///
    /// 반환된 핸들은 기다리지 않아도 됩니다. 테스트는 완료를 확인하기 위해 await 합니다.
    pub fn log_detached(&self, entry: AdminActionLog) -> JoinHandle<()> {
        let sink = self.sink.clone();
        let max_attempts = self.max_attempts;
        let retry_delay = self.retry_delay;

        rt::spawn(async move {
            for attempt in 1..=max_attempts {
                match sink.record(&entry).await {
                    Ok(()) => {
                        log::info!(
                            "📝 감사 로그 기록: {} {} v{:?} (correlation_id={})",
                            entry.action,
                            entry.target,
                            entry.roles_version,
                            entry.correlation_id
                        );
                        return;
                    }
                    Err(e) if attempt < max_attempts => {
                        log::warn!(
                            "⚠️ 감사 로그 기록 실패 ({}/{}), 재시도합니다: {}",
                            attempt,
                            max_attempts,
                            e
                        );
                        rt::time::sleep(retry_delay * attempt).await;
                    }
                    Err(e) => {
                        log::error!(
                            "❌ 감사 로그 기록 최종 실패 (correlation_id={}): {}",
                            entry.correlation_id,
                            e
                        );
                    }
                }
            }
        })
    }
}

fn admin_action_log_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(AdminActionLogService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "admin_action_log_service",
        constructor: admin_action_log_service_constructor,
    }
}
