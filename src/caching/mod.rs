//! Redis 연동 모듈
//!
//! 역할 버전 저장소의 Redis 백엔드(`ROLES_VERSION_STORE=redis`)가 사용합니다.
//! 역할 버전은 요청 간에 메모리에 캐싱하지 않으며, Redis 는 여기서 캐시가 아니라
//! 권위 있는 저장소로 쓰입니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
