//! 애플리케이션 전역 에러 모듈
//!
//! - [`errors::AppError`] - HTTP 응답으로 변환되는 최상위 에러
//! - [`errors::AuthError`] - 인증/인가 실패 분류
//! - [`errors::ConfigError`] - 시작 시점 설정 오류

pub mod errors;

pub use errors::{AppError, AppResult, AuthError, ConfigError, ErrorContext};
