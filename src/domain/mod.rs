//! # Domain Layer Module
//!
//! 역할 버전 기반 토큰 무효화의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - MongoDB 에 저장되는 객체 (SystemState, AdminActionLog)
//! ├── DTOs      - HTTP 요청/응답 계약
//! └── Models    - 인증 주체, JWT 클레임, 역할 버전 클레임, WhoAmI 투영
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! 엔티티는 영속성 형식을, DTO는 외부 API 형식을 책임지며
//! 모델은 둘 사이에서 순수한 값으로만 다뤄집니다.

pub mod entities;
pub mod dto;
pub mod models;

