//! # Core Framework Module
//!
//! 서비스 전반에서 사용하는 핵심 프레임워크 기능을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 인프라 컴포넌트와 서비스 싱글톤 보관
//! - **자동 레지스트리**: `inventory` 기반 서비스 등록 및 일괄 초기화
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! use crate::core::registry::ServiceLocator;
//!
//! ServiceLocator::set(database);
//! ServiceLocator::set(redis_client);
//! ServiceLocator::initialize_all().await?;
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
