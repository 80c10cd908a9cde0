//! 쿠키 기반 세션 해석
//!
//! 페이지 요청에서 `auth_token`/`refresh_token` 쿠키 값을 받아 현재 사용자를 결정합니다.
//! 액세스 토큰이 만료되었으면 리프레시 토큰으로 새 액세스 토큰을 발급하고,
//! 호출자가 이를 쿠키로 다시 내려보낼 수 있도록 함께 반환합니다.
//!
//! 모든 실패는 "세션 없음"으로 수렴합니다. 에러를 호출자에게 전파하지 않습니다.

use std::sync::Arc;

use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::{AccessClaims, TokenError};
use crate::repositories::users::UserStore;
use crate::services::auth::auth_service::AuthService;
use crate::services::auth::token_service::TokenService;

/// 세션 해석 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSession {
    pub identity: Option<AuthenticatedUser>,
    /// 새로 발급된 액세스 토큰. 있으면 `auth_token` 쿠키로 설정해야 합니다.
    pub refreshed_access_token: Option<String>,
}

impl ResolvedSession {
    pub fn none() -> Self {
        Self::default()
    }

    fn authenticated(identity: AuthenticatedUser) -> Self {
        Self {
            identity: Some(identity),
            refreshed_access_token: None,
        }
    }

    fn refreshed(identity: AuthenticatedUser, access_token: String) -> Self {
        Self {
            identity: Some(identity),
            refreshed_access_token: Some(access_token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

pub struct SessionResolver {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    auth: Arc<AuthService>,
}

impl SessionResolver {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>, auth: Arc<AuthService>) -> Self {
        Self { store, tokens, auth }
    }

    /// 쿠키 값으로 세션을 해석합니다.
    ///
    /// 1. 두 쿠키 모두 없음 → 세션 없음
    /// 2. 액세스 토큰 유효 → 클레임의 신원 (이전 구조 토큰은 저장소에서 역할을 채워 재발급)
    /// 3. 액세스 토큰 만료 또는 없음 + 리프레시 토큰 있음 → 갱신 시도
    /// 4. 액세스 토큰 위조/손상 → 세션 없음 (갱신 시도하지 않음)
    pub async fn resolve(&self, access_token: Option<&str>, refresh_token: Option<&str>) -> ResolvedSession {
        let access_token = access_token.filter(|t| !t.is_empty());
        let refresh_token = refresh_token.filter(|t| !t.is_empty());

        match access_token.map(|token| self.tokens.verify_access_token(token)) {
            Some(Ok(claims)) => match claims.identity() {
                Some(identity) => ResolvedSession::authenticated(identity),
                None => self.upgrade_legacy(&claims).await,
            },
            Some(Err(TokenError::Invalid)) => {
                log::debug!("세션 해석: 유효하지 않은 액세스 토큰");
                ResolvedSession::none()
            }
            Some(Err(TokenError::Expired)) | None => match refresh_token {
                Some(token) => self.refresh(token).await,
                None => ResolvedSession::none(),
            },
        }
    }

    async fn refresh(&self, refresh_token: &str) -> ResolvedSession {
        match self.auth.refresh(refresh_token).await {
            Ok(outcome) => ResolvedSession::refreshed(outcome.user, outcome.access_token),
            Err(e) => {
                log::debug!("세션 해석: 리프레시 실패 ({})", e.code());
                ResolvedSession::none()
            }
        }
    }

    /// 역할 정보가 없는 이전 구조 토큰을 현재 구조로 교체합니다.
    async fn upgrade_legacy(&self, claims: &AccessClaims) -> ResolvedSession {
        let user = match self.store.find_by_id(&claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => return ResolvedSession::none(),
            Err(e) => {
                log::error!("세션 해석 중 저장소 오류: {}", e);
                return ResolvedSession::none();
            }
        };

        let Some(identity) = AuthenticatedUser::from_user(&user) else {
            return ResolvedSession::none();
        };

        match self.tokens.issue_access_token(&identity) {
            Ok(token) => {
                log::info!("이전 구조 액세스 토큰 갱신: user_id={}", identity.user_id);
                ResolvedSession::refreshed(identity, token)
            }
            Err(e) => {
                log::error!("액세스 토큰 재발급 실패: {}", e);
                ResolvedSession::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::domain::entities::users::user::{Role, User};
    use crate::repositories::users::InMemoryUserStore;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const PASSWORD: &str = "Lot-42-Sedan";

    struct Fixture {
        store: Arc<InMemoryUserStore>,
        tokens: Arc<TokenService>,
        auth: Arc<AuthService>,
        resolver: SessionResolver,
        user_id: String,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryUserStore::new());
        let tokens = Arc::new(TokenService::new(&AuthConfig::with_secrets("access-test", "refresh-test")));
        let user = store
            .create(User::new(
                "seller@dealer.test".into(),
                bcrypt::hash(PASSWORD, 4).unwrap(),
                Some("Seller".into()),
                Role::User,
            ))
            .await
            .unwrap();

        let auth = Arc::new(AuthService::new(store.clone(), tokens.clone()));
        let resolver = SessionResolver::new(store.clone(), tokens.clone(), auth.clone());

        Fixture {
            store,
            tokens,
            auth,
            resolver,
            user_id: user.id_string().unwrap(),
        }
    }

    fn legacy_token(sub: &str) -> String {
        let now = Utc::now().timestamp();
        encode(
            &Header::default(),
            &json!({ "sub": sub, "email": "seller@dealer.test", "iat": now, "exp": now + 300 }),
            &EncodingKey::from_secret(b"access-test"),
        )
        .unwrap()
    }

    #[actix_web::test]
    async fn test_no_cookies_no_session() {
        let f = fixture().await;
        assert_eq!(f.resolver.resolve(None, None).await, ResolvedSession::none());
        assert_eq!(f.resolver.resolve(Some(""), Some("")).await, ResolvedSession::none());
    }

    #[actix_web::test]
    async fn test_valid_access_token_needs_no_refresh() {
        let f = fixture().await;
        let login = f.auth.login("seller@dealer.test", PASSWORD).await.unwrap();

        let session = f.resolver.resolve(Some(&login.access_token), None).await;
        assert_eq!(session.identity.unwrap().user_id, f.user_id);
        assert!(session.refreshed_access_token.is_none());
    }

    #[actix_web::test]
    async fn test_expired_access_token_refreshes() {
        let f = fixture().await;
        let login = f.auth.login("seller@dealer.test", PASSWORD).await.unwrap();
        let identity = login.user.clone();
        let expired = f
            .tokens
            .issue_access_token_at(&identity, Utc::now().timestamp() - 600)
            .unwrap();

        let session = f.resolver.resolve(Some(&expired), Some(&login.refresh_token)).await;
        assert_eq!(session.identity, Some(identity));

        let new_token = session.refreshed_access_token.unwrap();
        assert!(f.tokens.verify_access_token(&new_token).is_ok());
    }

    #[actix_web::test]
    async fn test_missing_access_token_refreshes() {
        let f = fixture().await;
        let login = f.auth.login("seller@dealer.test", PASSWORD).await.unwrap();

        let session = f.resolver.resolve(None, Some(&login.refresh_token)).await;
        assert!(session.is_authenticated());
        assert!(session.refreshed_access_token.is_some());
    }

    #[actix_web::test]
    async fn test_tampered_access_token_does_not_refresh() {
        let f = fixture().await;
        let login = f.auth.login("seller@dealer.test", PASSWORD).await.unwrap();
        let tampered = format!("{}x", login.access_token);

        let session = f.resolver.resolve(Some(&tampered), Some(&login.refresh_token)).await;
        assert_eq!(session, ResolvedSession::none());
    }

    #[actix_web::test]
    async fn test_revoked_refresh_gives_no_session() {
        let f = fixture().await;
        let first = f.auth.login("seller@dealer.test", PASSWORD).await.unwrap();
        f.auth.login("seller@dealer.test", PASSWORD).await.unwrap();

        let session = f.resolver.resolve(None, Some(&first.refresh_token)).await;
        assert!(!session.is_authenticated());
    }

    #[actix_web::test]
    async fn test_legacy_token_is_upgraded() {
        let f = fixture().await;

        let session = f.resolver.resolve(Some(&legacy_token(&f.user_id)), None).await;
        let identity = session.identity.unwrap();
        assert_eq!(identity.role, Role::User);
        assert_eq!(identity.name.as_deref(), Some("Seller"));

        let upgraded = session.refreshed_access_token.unwrap();
        let claims = f.tokens.verify_access_token(&upgraded).unwrap();
        assert!(!claims.is_legacy());
    }

    #[actix_web::test]
    async fn test_legacy_token_for_deleted_user() {
        let f = fixture().await;
        f.store.delete(&f.user_id).await.unwrap();

        let session = f.resolver.resolve(Some(&legacy_token(&f.user_id)), None).await;
        assert_eq!(session, ResolvedSession::none());
    }
}
