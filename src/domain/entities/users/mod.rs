//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::{Role, User};
//!
//! let user = User::new(
//!     "manager@dealer.test".to_string(),
//!     hashed_password,
//!     Some("Manager".to_string()),
//!     Role::Admin,
//! );
//! ```

pub mod user;

pub use user::{Role, User};
