//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 입력 문자열 검증, 정리, 이메일 정규화
//! - [`cookies`] - 인증 쿠키 이름과 생성 함수

pub mod cookies;
pub mod string_utils;
