//! 딜러 백오피스 인증 서비스
//!
//! 액세스 토큰과 리프레시 토큰을 함께 쓰는 JWT 인증 코어입니다.
//!
//! # Features
//!
//! - **이중 토큰 인증**: 5분 액세스 토큰 + 7일 리프레시 토큰, 서로 다른 키로 서명
//! - **단일 활성 리프레시 토큰**: 로그인마다 저장값을 덮어쓰고 로그아웃 시 비움
//! - **세션 해석**: 쿠키 기반 페이지 요청에서 만료된 액세스 토큰을 자동 갱신
//! - **역할 기반 접근 제어**: `USER` / `ADMIN`
//! - **요청 제한**: IP별 고정 윈도우, 추적 IP 수 상한
//! - **MongoDB** 또는 메모리 사용자 저장소
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답, 쿠키 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰, 인증, 세션, 사용자 관리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   UserStore     │ ← MongoDB / 메모리
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
