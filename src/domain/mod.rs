//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 영속 엔티티 (User, Role)
//! ├── models    - 값 객체 (AuthenticatedUser, 토큰 클레임)
//! └── dto       - API 요청/응답 계약
//! ```

pub mod entities;
pub mod dto;
pub mod models;
