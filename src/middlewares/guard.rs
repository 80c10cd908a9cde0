//! API 요청 인증 가드
//!
//! 요청에서 액세스 토큰을 찾아 검증하고 실패 종류를 구분하여 반환합니다.
//! 가드는 리프레시를 수행하지 않습니다. `token_expired`를 받은 클라이언트가
//! 직접 `/api/v2/auth/refresh`를 호출해야 합니다.

use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;

use crate::domain::entities::users::user::Role;
use crate::domain::models::auth::{AuthenticatedUser, RequiredRole};
use crate::domain::models::token::TokenError;
use crate::errors::AuthError;
use crate::services::auth::TokenService;
use crate::utils::cookies::{cookie_value, ACCESS_COOKIE};

/// 요청에서 액세스 토큰 추출
///
/// `Authorization: Bearer` 헤더가 우선이고, 없으면 `auth_token` 쿠키를 사용합니다.
pub fn extract_access_token(req: &HttpRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(TokenService::extract_bearer_token)
        .map(str::to_string);

    from_header.or_else(|| cookie_value(req, ACCESS_COOKIE))
}

/// 요청의 신원을 확인합니다.
///
/// # Errors
///
/// * `AuthError::Unauthenticated` - 토큰 없음
/// * `AuthError::TokenExpired` - 만료되었거나 역할 정보가 없는 이전 구조 토큰
/// * `AuthError::TokenInvalid` - 서명 불일치, 형식 오류
pub fn authenticate(req: &HttpRequest, tokens: &TokenService) -> Result<AuthenticatedUser, AuthError> {
    let token = extract_access_token(req).ok_or(AuthError::Unauthenticated)?;

    let claims = tokens.verify_access_token(&token).map_err(|e| match e {
        TokenError::Expired => AuthError::TokenExpired,
        TokenError::Invalid => AuthError::TokenInvalid,
    })?;

    // 이전 구조 토큰은 리프레시로 교체하도록 만료로 응답
    claims.identity().ok_or(AuthError::TokenExpired)
}

pub fn require_role(user: &AuthenticatedUser, role: Role) -> Result<(), AuthError> {
    authorize(user, &RequiredRole::Single(role))
}

pub fn authorize(user: &AuthenticatedUser, required: &RequiredRole) -> Result<(), AuthError> {
    if required.is_satisfied(user.role) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
