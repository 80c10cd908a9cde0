//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 서비스 계층은 구체 타입 대신 [`UserStore`] trait 객체(`Arc<dyn UserStore>`)에
//! 의존합니다. 운영에서는 [`UserRepository`](user_repo::UserRepository)(MongoDB),
//! 테스트와 로컬 개발에서는 [`InMemoryUserStore`](memory_store::InMemoryUserStore)를 주입합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{UserStore, memory_store::InMemoryUserStore};
//!
//! let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
//! let user = store.find_by_email("user@example.com").await?;
//! ```

pub mod user_repo;
pub mod memory_store;

use async_trait::async_trait;

use crate::domain::entities::users::user::{Role, User};
use crate::errors::AppError;

pub use memory_store::InMemoryUserStore;
pub use user_repo::UserRepository;

/// 사용자 자격 증명 저장소
///
/// ID 인자는 ObjectId 16진수 문자열입니다. 형식이 잘못된 ID는
/// 존재하지 않는 사용자와 동일하게 취급합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// 이메일로 조회. 입력은 저장 형식(소문자, 공백 제거)으로 정규화됩니다.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 저장된 리프레시 토큰을 교체합니다. `None`이면 비웁니다.
    ///
    /// 해당 사용자가 없으면 아무 것도 하지 않습니다.
    async fn update_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), AppError>;

    /// 새 사용자 저장. 이메일이 이미 있으면 `AppError::ConflictError`
    async fn create(&self, user: User) -> Result<User, AppError>;

    /// 전체 사용자 목록 (최신 생성 순)
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn update_role(&self, id: &str, role: Role) -> Result<Option<User>, AppError>;

    /// 삭제 여부를 반환합니다.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// 저장소 연결 상태 확인
    async fn ping(&self) -> Result<(), AppError>;
}
