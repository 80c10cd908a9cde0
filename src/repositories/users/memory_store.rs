//! 프로세스 메모리 기반 사용자 저장소
//!
//! 테스트와 `STORE_BACKEND=memory` 로컬 개발 모드에서 사용합니다.
//! 재시작하면 모든 데이터가 사라집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use parking_lot::RwLock;

use crate::domain::entities::users::user::{Role, User};
use crate::errors::AppError;
use crate::repositories::users::UserStore;
use crate::utils::string_utils::normalize_email;

#[derive(Default)]
struct Inner {
    /// ObjectId 16진수 → 사용자
    users: HashMap<String, User>,
    /// 정규화된 이메일 → ObjectId 16진수
    ids_by_email: HashMap<String, String>,
}

#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read();
        Ok(inner
            .ids_by_email
            .get(&normalize_email(email))
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn update_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), AppError> {
        if let Some(user) = self.inner.write().users.get_mut(id) {
            user.refresh_token = token.map(str::to_string);
        }
        Ok(())
    }

    async fn create(&self, mut user: User) -> Result<User, AppError> {
        user.email = normalize_email(&user.email);

        let mut inner = self.inner.write();
        if inner.ids_by_email.contains_key(&user.email) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let id = ObjectId::new();
        user.id = Some(id);

        inner.ids_by_email.insert(user.email.clone(), id.to_hex());
        inner.users.insert(id.to_hex(), user.clone());

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.inner.read().users.values().cloned().collect();
        // ObjectId는 생성 시각 순으로 증가하므로 같은 밀리초 안에서도 순서가 유지됩니다
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(users)
    }

    async fn update_role(&self, id: &str, role: Role) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.write();
        Ok(inner.users.get_mut(id).map(|user| {
            user.role = role;
            user.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut inner = self.inner.write();
        match inner.users.remove(id) {
            Some(user) => {
                inner.ids_by_email.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new(email.to_string(), "hash".to_string(), None, Role::User)
    }

    #[actix_web::test]
    async fn test_create_assigns_id_and_normalizes_email() {
        let store = InMemoryUserStore::new();
        let created = store.create(user("  Sales@Dealer.TEST ")).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.email, "sales@dealer.test");

        let found = store.find_by_email("SALES@dealer.test").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[actix_web::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryUserStore::new();
        store.create(user("a@dealer.test")).await.unwrap();

        let result = store.create(user("A@dealer.test")).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_refresh_token_overwrite_and_clear() {
        let store = InMemoryUserStore::new();
        let id = store.create(user("a@dealer.test")).await.unwrap().id_string().unwrap();

        store.update_refresh_token(&id, Some("first")).await.unwrap();
        store.update_refresh_token(&id, Some("second")).await.unwrap();
        let stored = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("second"));

        store.update_refresh_token(&id, None).await.unwrap();
        let stored = store.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());
    }

    #[actix_web::test]
    async fn test_unknown_ids_are_absent() {
        let store = InMemoryUserStore::new();
        assert!(store.find_by_id("not-an-object-id").await.unwrap().is_none());
        assert!(store.update_role(&ObjectId::new().to_hex(), Role::Admin).await.unwrap().is_none());
        assert!(!store.delete(&ObjectId::new().to_hex()).await.unwrap());
        store.update_refresh_token("missing", Some("x")).await.unwrap();
    }

    #[actix_web::test]
    async fn test_list_newest_first_and_delete() {
        let store = InMemoryUserStore::new();
        let first = store.create(user("first@dealer.test")).await.unwrap();
        let second = store.create(user("second@dealer.test")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        assert!(store.delete(&first.id_string().unwrap()).await.unwrap());
        assert!(store.find_by_email("first@dealer.test").await.unwrap().is_none());
        // 삭제된 이메일은 다시 사용할 수 있음
        store.create(user("first@dealer.test")).await.unwrap();
    }
}
