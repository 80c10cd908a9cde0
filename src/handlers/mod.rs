//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 핸들러는 요청을 DTO로 변환하고
//! 검증한 뒤 [`AppContext`](crate::core::AppContext)의 서비스에 위임하며,
//! 결과를 응답 DTO와 쿠키로 되돌려줍니다.
//!
//! ```text
//! Client ──▶ RateLimitMiddleware ──▶ (AuthMiddleware) ──▶ Handler ──▶ Service ──▶ UserStore
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: v1 회원가입, 단일 토큰 로그인
//! - **`token_handlers`**: v2 이중 토큰 로그인, 갱신, 로그아웃, 현재 사용자, 세션 조회
//! - **`admin_users`**: 관리자 전용 사용자 관리
//! - **`pages`**: 쿠키 세션 기반 페이지 게이트
//! - **`status`**: 저장소 연결 상태
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하고, 에러는
//! `AppError`의 `ResponseError` 구현으로 JSON 응답이 됩니다.

pub mod admin_users;
pub mod auth;
pub mod pages;
pub mod status;
pub mod token_handlers;
