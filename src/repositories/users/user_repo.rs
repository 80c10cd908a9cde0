//! # 사용자 리포지토리 구현
//!
//! MongoDB `users` 컬렉션에 대한 [`UserStore`] 구현입니다.
//!
//! ## 특징
//!
//! - **데이터 무결성**: 이메일 유니크 인덱스와 사전 중복 확인
//! - **캐싱 없음**: 리프레시 토큰 비교는 항상 최신 저장 값을 읽어야 합니다

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{bson::{doc, oid::ObjectId}, Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::users::user::{Role, User};
use crate::errors::AppError;
use crate::repositories::users::UserStore;
use crate::utils::string_utils::normalize_email;

const COLLECTION_NAME: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 저장 구조
///
/// - **컬렉션명**: `users`
/// - **인덱스**: email(unique), created_at(desc)
///
/// ## 에러 처리
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ConflictError**: 이메일 중복
#[derive(Clone)]
pub struct UserRepository {
    db: Database,
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        let collection = db.get_database().collection::<User>(COLLECTION_NAME);
        Self { db, collection }
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 1. **이메일 유니크 인덱스** - 중복 이메일 방지 및 로그인 조회 최적화
    /// 2. **생성일 인덱스** - 관리자 목록 정렬
    ///
    /// 애플리케이션 초기화 시점에 한 번 호출됩니다.
    /// 이미 중복 데이터가 있는 경우 유니크 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "email": normalize_email(email) })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn update_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), AppError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(());
        };

        self.collection
            .update_one(
                doc! { "_id": object_id },
                doc! { "$set": { "refresh_token": token } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn create(&self, mut user: User) -> Result<User, AppError> {
        user.email = normalize_email(&user.email);

        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        user.id = Some(ObjectId::new());

        // 사전 확인과 삽입 사이의 경합은 유니크 인덱스가 막습니다
        self.collection
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn update_role(&self, id: &str, role: Role) -> Result<Option<User>, AppError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(None);
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": { "role": role.as_str() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(object_id) = parse_id(id) else {
            return Ok(false);
        };

        let result = self.collection
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db
            .get_database()
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
