use std::sync::Arc;

use crate::config::{AuthConfig, RateLimitConfig};
use crate::middlewares::rate_limit::RateLimiter;
use crate::repositories::users::UserStore;
use crate::services::auth::{AuthService, SessionResolver, TokenService};
use crate::services::users::UserService;

/// 요청 처리에 필요한 모든 공유 서비스
///
/// 복제 비용은 `Arc` 참조 카운트 증가뿐입니다.
#[derive(Clone)]
pub struct AppContext {
    pub auth_config: Arc<AuthConfig>,
    pub user_store: Arc<dyn UserStore>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub session_resolver: Arc<SessionResolver>,
    pub user_service: Arc<UserService>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppContext {
    pub fn new(
        auth_config: AuthConfig,
        user_store: Arc<dyn UserStore>,
        bcrypt_cost: u32,
        rate_limit: RateLimitConfig,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(&auth_config));
        let auth_service = Arc::new(AuthService::new(user_store.clone(), token_service.clone()));
        let session_resolver = Arc::new(SessionResolver::new(
            user_store.clone(),
            token_service.clone(),
            auth_service.clone(),
        ));
        let user_service = Arc::new(UserService::new(user_store.clone(), bcrypt_cost));

        Self {
            auth_config: Arc::new(auth_config),
            user_store,
            token_service,
            auth_service,
            session_resolver,
            user_service,
            rate_limiter: Arc::new(RateLimiter::new(rate_limit)),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::domain::entities::users::user::{Role, User};
    use crate::repositories::users::InMemoryUserStore;

    pub const ACCESS_SECRET: &str = "test-access-secret";
    pub const REFRESH_SECRET: &str = "test-refresh-secret";
    pub const PASSWORD: &str = "Forecourt-2024";

    /// 메모리 저장소와 테스트용 키로 구성된 컨텍스트
    pub fn test_context() -> (AppContext, Arc<InMemoryUserStore>) {
        test_context_with_rate_limit(RateLimitConfig {
            max_requests: 10_000,
            ..RateLimitConfig::default()
        })
    }

    pub fn test_context_with_rate_limit(rate_limit: RateLimitConfig) -> (AppContext, Arc<InMemoryUserStore>) {
        let store = Arc::new(InMemoryUserStore::new());
        let context = AppContext::new(
            AuthConfig::with_secrets(ACCESS_SECRET, REFRESH_SECRET),
            store.clone(),
            4,
            rate_limit,
        );
        (context, store)
    }

    /// `PASSWORD`로 로그인할 수 있는 사용자를 저장하고 ID를 반환합니다.
    pub async fn seed_user(store: &InMemoryUserStore, email: &str, role: Role) -> String {
        let hash = bcrypt::hash(PASSWORD, 4).unwrap();
        store
            .create(User::new(email.to_string(), hash, Some("Test User".to_string()), role))
            .await
            .unwrap()
            .id_string()
            .unwrap()
    }
}
