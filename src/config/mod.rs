//! # Configuration Module
//!
//! 인증 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 프로세스 시작 시점에 한 번 읽어
//! 값 객체로 고정합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 저장소, 서버, 패스워드, 요청 빈도 제한 설정
//! - [`auth_config`] - JWT 서명 키, 토큰 수명, 쿠키 보안 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! 개발, 테스트, 스테이징, 프로덕션 환경별로 다른 기본값을 제공합니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 서명 키는 환경 변수로만 제공
//! - 개발 환경에서 키가 없으면 무작위 키 생성 (경고 로그)
//! - 프로덕션에서 필수 설정값 누락 시 [`crate::errors::ConfigError`]로 시작 중단
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 실행 환경
//! export ENVIRONMENT="production"  # development, test, staging, production
//!
//! # JWT 설정
//! export AUTH_SECRET="access-secret"
//! export REFRESH_SECRET="refresh-secret"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="dealer_auth"
//! export STORE_BACKEND="mongo"     # mongo, memory
//!
//! # 보안 설정
//! export BCRYPT_COST="10"          # 4-15 범위
//! export RATE_LIMIT_MAX="20"
//! export RATE_LIMIT_WINDOW_SECONDS="60"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
