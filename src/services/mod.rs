//! # Service Layer
//!
//! 비즈니스 로직 계층입니다. 모든 서비스는 [`crate::core::AppContext`]가
//! 시작 시점에 한 번 생성하여 주입합니다.
//!
//! - [`auth`] - 토큰 발급/검증, 로그인/갱신/로그아웃, 쿠키 세션 해석
//! - [`users`] - 회원가입, 관리자용 사용자 관리

pub mod users;
pub mod auth;
