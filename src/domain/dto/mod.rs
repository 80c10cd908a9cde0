//! # Data Transfer Objects
//!
//! HTTP API 경계에서 주고받는 요청/응답 구조체입니다.
//! JSON 필드명은 기존 클라이언트와 호환되도록 camelCase(`accessToken`, `createdAt`)를 사용합니다.
//!
//! - [`tokens`] - 로그인, 토큰 갱신, 공통 응답 래퍼
//! - [`users`] - 회원가입, 관리자 사용자 관리

pub mod tokens;
pub mod users;
