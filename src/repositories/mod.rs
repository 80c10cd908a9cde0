//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 사용자 자격 증명 저장소만 있습니다. 서비스는 [`users::UserStore`] trait 객체에
//! 의존하고, 시작 시점에 MongoDB 구현이나 메모리 구현 중 하나가 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let store: Arc<dyn UserStore> = Arc::new(UserRepository::new(database));
//! let user = store.find_by_email("user@example.com").await?;
//! ```

pub mod users;
