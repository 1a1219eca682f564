//! 역할 버전 저장소 추상화

use async_trait::async_trait;
use crate::core::errors::AppResult;

/// 권위 있는 역할 버전 저장소
///
/// 구현체는 두 연산 모두 저장소 명령 하나로 원자적으로 수행해야 합니다.
/// 호출 중인 future 가 중간에 drop 되어도 버전이 일부만 갱신된 상태로 남지 않습니다.
#[async_trait]
pub trait RolesVersionStore: Send + Sync {
    /// 현재 버전을 읽습니다. 값이 없으면 초기값으로 생성한 뒤 반환합니다.
    async fn current(&self) -> AppResult<i64>;

    /// 버전을 1 증가시키고 증가 후 값을 반환합니다.
    ///
    /// 동시 호출 N 건은 서로 다른 N 개의 연속된 값을 받습니다.
    async fn increment(&self) -> AppResult<i64>;

    /// 로그와 헬스 체크에 쓰이는 백엔드 이름
    fn backend_name(&self) -> &'static str;
}
