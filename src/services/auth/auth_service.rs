//! 로그인/토큰 갱신/로그아웃 서비스
//!
//! 사용자당 활성 리프레시 토큰은 하나입니다. 로그인은 저장된 값을 덮어쓰고,
//! 로그아웃은 비우며, 갱신은 리프레시 토큰을 교체하지 않습니다.
//!
//! 비교 후 덮어쓰기 구간에는 잠금이 없으므로 동시에 로그인하면 마지막 저장이 이깁니다.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::domain::entities::users::user::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenError;
use crate::errors::{AppError, AuthError};
use crate::repositories::users::UserStore;
use crate::services::auth::token_service::TokenService;
use crate::utils::string_utils::normalize_email;

/// 이중 토큰 로그인 결과
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthenticatedUser,
}

/// 단일 세션 토큰 로그인 결과
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub access_token: String,
    pub user: AuthenticatedUser,
}

/// 토큰 갱신 결과. 리프레시 토큰은 그대로 유지됩니다.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub access_token: String,
    pub user: AuthenticatedUser,
}

pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// 이메일/비밀번호로 로그인하고 액세스/리프레시 토큰을 발급합니다.
    ///
    /// 발급된 리프레시 토큰은 사용자 레코드에 저장되어 이전 토큰을 대체합니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - 이메일 없음 또는 비밀번호 불일치 (구분하지 않음)
    /// * `AppError::DatabaseError` - 저장소 오류
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let identity = self.verify_credentials(email, password).await?;

        let access_token = self.tokens.issue_access_token(&identity)?;
        let refresh_token = self.tokens.issue_refresh_token(&identity.user_id)?;

        self.store
            .update_refresh_token(&identity.user_id, Some(&refresh_token))
            .await?;

        log::info!("로그인 성공: user_id={}", identity.user_id);

        Ok(LoginOutcome {
            access_token,
            refresh_token,
            user: identity,
        })
    }

    /// 액세스 토큰만 발급하는 단일 세션 로그인
    ///
    /// 저장된 리프레시 토큰은 건드리지 않습니다.
    pub async fn login_session(&self, email: &str, password: &str) -> Result<SessionOutcome, AppError> {
        let identity = self.verify_credentials(email, password).await?;
        let access_token = self.tokens.issue_access_token(&identity)?;

        log::info!("세션 로그인 성공: user_id={}", identity.user_id);

        Ok(SessionOutcome {
            access_token,
            user: identity,
        })
    }

    /// 리프레시 토큰으로 새 액세스 토큰을 발급합니다.
    ///
    /// 신원(역할, 이름)은 토큰이 아니라 현재 사용자 레코드에서 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AuthError::TokenExpired` - 리프레시 토큰 만료
    /// * `AuthError::RefreshInvalid` - 서명/형식/타입 오류
    /// * `AuthError::UserNotFound` - subject 사용자가 삭제됨
    /// * `AuthError::RefreshRevoked` - 저장된 값과 불일치 (이후 로그인 또는 로그아웃됨)
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, AppError> {
        let claims = self
            .tokens
            .decode_refresh_token(refresh_token)
            .map_err(|e| match e {
                TokenError::Expired => AuthError::TokenExpired,
                TokenError::Invalid => AuthError::RefreshInvalid,
            })?;

        let user = self
            .store
            .find_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let is_current = user
            .refresh_token
            .as_deref()
            .is_some_and(|stored| tokens_match(stored, refresh_token));

        if !is_current {
            log::warn!("폐기된 리프레시 토큰 사용 시도: user_id={}", claims.sub);
            return Err(AuthError::RefreshRevoked.into());
        }

        let identity = identity_of(&user)?;
        let access_token = self.tokens.issue_access_token(&identity)?;

        log::debug!("액세스 토큰 갱신: user_id={}", identity.user_id);

        Ok(RefreshOutcome {
            access_token,
            user: identity,
        })
    }

    /// 저장된 리프레시 토큰을 비웁니다.
    ///
    /// 이미 발급된 액세스 토큰은 만료될 때까지 유효합니다.
    pub async fn logout(&self, user_id: &str) -> Result<(), AppError> {
        self.store.update_refresh_token(user_id, None).await?;
        log::info!("로그아웃: user_id={}", user_id);
        Ok(())
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AppError> {
        let email = normalize_email(email);

        let Some(user) = self.store.find_by_email(&email).await? else {
            log::warn!("로그인 실패: 등록되지 않은 이메일");
            return Err(AuthError::InvalidCredentials.into());
        };

        let matches = bcrypt::verify(password, &user.password_hash).unwrap_or_else(|e| {
            log::error!("비밀번호 해시 검증 오류: {}", e);
            false
        });

        if !matches {
            log::warn!("로그인 실패: 비밀번호 불일치 (user_id={:?})", user.id_string());
            return Err(AuthError::InvalidCredentials.into());
        }

        identity_of(&user)
    }
}

/// 저장된 리프레시 토큰과 제시된 값을 상수 시간으로 비교합니다.
fn tokens_match(stored: &str, presented: &str) -> bool {
    stored.len() == presented.len() && bool::from(stored.as_bytes().ct_eq(presented.as_bytes()))
}

fn identity_of(user: &User) -> Result<AuthenticatedUser, AppError> {
    AuthenticatedUser::from_user(user)
        .ok_or_else(|| AppError::InternalError("저장된 사용자에 ID가 없습니다".to_string()))
}
