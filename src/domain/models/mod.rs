//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델과 값 객체입니다.
//!
//! - [`auth`] - 요청 단위로 확인된 사용자 신원, 역할 요구사항
//! - [`token`] - 액세스/리프레시 JWT 클레임

pub mod auth;
pub mod token;
