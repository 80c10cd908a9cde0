//! # Entities Module
//!
//! MongoDB에 영속되는 도메인 엔티티입니다.
//! 고유 식별자(`ObjectId`)를 가지며 저장소 계층을 통해서만 생성/수정됩니다.

pub mod users;

pub use users::*;
