//! # 사용자 관리 서비스 구현
//!
//! 회원가입과 관리자용 사용자 관리(목록, 생성, 역할 변경, 삭제)를 담당합니다.
//!
//! ## 보안 규칙
//!
//! - **bcrypt 해싱**: 환경별 cost ([`PasswordConfig`](crate::config::PasswordConfig))
//! - **자기 보호**: 관리자는 자신의 역할을 바꾸거나 자신을 삭제할 수 없습니다
//! - **민감 정보 제거**: 응답 DTO에는 비밀번호 해시와 리프레시 토큰이 없습니다

use std::sync::Arc;

use bcrypt::hash;

use crate::domain::dto::users::{RegisteredUserResponse, UserResponse};
use crate::domain::entities::users::user::{Role, User};
use crate::errors::{AppError, ErrorContext};
use crate::repositories::users::UserStore;
use crate::utils::string_utils::{clean_optional_string, normalize_email, validate_required_string};

/// 새 계정 생성에 필요한 입력
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub role: Role,
}

pub struct UserService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// 셀프 회원가입. 항상 `USER` 역할로 생성됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 이메일 또는 비밀번호 누락
    /// * `AppError::ConflictError` - 이미 등록된 이메일
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<RegisteredUserResponse, AppError> {
        let user = self
            .create(NewUser {
                email: email.to_string(),
                password: password.to_string(),
                name,
                role: Role::User,
            })
            .await?;

        Ok(RegisteredUserResponse::from(user))
    }

    /// 관리자가 역할을 지정하여 계정을 생성합니다.
    pub async fn create_user(&self, new_user: NewUser) -> Result<UserResponse, AppError> {
        let user = self.create(new_user).await?;
        Ok(UserResponse::from(user))
    }

    /// 전체 사용자 목록 (최신 생성 순)
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.store.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 다른 사용자의 역할을 변경합니다.
    ///
    /// # Arguments
    ///
    /// * `actor_id` - 요청한 관리자 ID
    /// * `target_id` - 대상 사용자 ID
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 자기 자신의 역할 변경 시도
    /// * `AppError::NotFound` - 대상 사용자 없음
    pub async fn update_role(&self, actor_id: &str, target_id: &str, role: Role) -> Result<UserResponse, AppError> {
        if actor_id == target_id {
            return Err(AppError::ValidationError("자신의 역할은 변경할 수 없습니다".to_string()));
        }

        let updated = self
            .store
            .update_role(target_id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        log::info!("역할 변경: actor={} target={} role={}", actor_id, target_id, role);
        Ok(UserResponse::from(updated))
    }

    /// 다른 사용자를 삭제합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 자기 자신 삭제 시도
    /// * `AppError::NotFound` - 대상 사용자 없음
    pub async fn delete_user(&self, actor_id: &str, target_id: &str) -> Result<(), AppError> {
        if actor_id == target_id {
            return Err(AppError::ValidationError("자신의 계정은 삭제할 수 없습니다".to_string()));
        }

        if !self.store.delete(target_id).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("사용자 삭제: actor={} target={}", actor_id, target_id);
        Ok(())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let email = normalize_email(&validate_required_string(&new_user.email, "이메일")?);
        if new_user.password.is_empty() {
            return Err(AppError::ValidationError("비밀번호은(는) 필수입니다".to_string()));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let password_hash = hash(&new_user.password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;

        let user = User::new(email, password_hash, clean_optional_string(new_user.name), new_user.role);
        let created = self.store.create(user).await?;

        log::info!("사용자 생성: id={:?} role={}", created.id_string(), created.role);
        Ok(created)
    }
}
