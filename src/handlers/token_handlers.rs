//! 이중 토큰 인증 HTTP 핸들러 (v2)
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/v2/auth/login` | 액세스 + 리프레시 토큰 발급, 두 쿠키 설정 |
//! | `POST` | `/api/v2/auth/refresh` | 본문 `refreshToken` 또는 쿠키로 액세스 토큰 재발급 |
//! | `POST` | `/api/v2/auth/logout` | 저장된 리프레시 토큰 폐기, 쿠키 삭제 |
//! | `GET` | `/api/v2/auth/me` | 액세스 토큰의 신원 |
//! | `GET` | `/api/v2/auth/session` | 쿠키 세션 해석 (필요하면 자동 갱신) |
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::core::AppContext;
use crate::domain::dto::tokens::{
    ApiResponse, AuthenticatedUserResponse, LoginRequest, LoginResponse, RefreshResponse,
    RefreshTokenRequest,
};
use crate::errors::{AppError, AuthError};
use crate::middlewares::guard;
use crate::utils::cookies::{self, cookie_value, ACCESS_COOKIE, REFRESH_COOKIE};

/// 이중 토큰 로그인 핸들러
#[post("/login")]
pub async fn login(
    context: web::Data<AppContext>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let outcome = context.auth_service.login(&payload.email, &payload.password).await?;
    let secure = context.auth_config.secure_cookies;

    Ok(HttpResponse::Ok()
        .cookie(cookies::access_cookie(
            &outcome.access_token,
            context.token_service.access_ttl_seconds(),
            secure,
        ))
        .cookie(cookies::refresh_cookie(
            &outcome.refresh_token,
            context.auth_config.refresh_ttl_seconds(),
            secure,
        ))
        .json(ApiResponse::success(LoginResponse {
            access_token: outcome.access_token,
            refresh_token: outcome.refresh_token,
            user: outcome.user.into(),
        })))
}

/// 토큰 갱신 핸들러
///
/// 본문의 `refreshToken`이 우선이고, 본문이 없거나 비어 있으면 `refresh_token` 쿠키를 사용합니다.
/// 리프레시 토큰은 교체되지 않습니다.
///
/// # Responses
/// * `400 refresh_token_required` - 토큰 없음
/// * `401 token_expired` / `invalid_refresh_token` / `refresh_token_revoked` / `user_not_found`
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    context: web::Data<AppContext>,
    payload: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = payload
        .and_then(|body| body.into_inner().refresh_token)
        .filter(|token| !token.trim().is_empty())
        .or_else(|| cookie_value(&req, REFRESH_COOKIE))
        .ok_or(AuthError::MissingRefreshToken)?;

    let outcome = context.auth_service.refresh(&refresh_token).await?;

    Ok(HttpResponse::Ok()
        .cookie(cookies::access_cookie(
            &outcome.access_token,
            context.token_service.access_ttl_seconds(),
            context.auth_config.secure_cookies,
        ))
        .json(ApiResponse::success(RefreshResponse {
            access_token: outcome.access_token,
            user: outcome.user.into(),
        })))
}

/// 로그아웃 핸들러
///
/// 유효한 액세스 토큰이 필요합니다. 이후 이 사용자의 모든 리프레시 시도는 `refresh_token_revoked`가 됩니다.
#[post("/logout")]
pub async fn logout(req: HttpRequest, context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let user = guard::authenticate(&req, &context.token_service)?;
    context.auth_service.logout(&user.user_id).await?;

    let secure = context.auth_config.secure_cookies;
    Ok(HttpResponse::Ok()
        .cookie(cookies::expired_cookie(ACCESS_COOKIE, secure))
        .cookie(cookies::expired_cookie(REFRESH_COOKIE, secure))
        .json(ApiResponse::message("로그아웃되었습니다")))
}

#[get("/me")]
pub async fn me(req: HttpRequest, context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let user = guard::authenticate(&req, &context.token_service)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(AuthenticatedUserResponse::from(user))))
}

/// 쿠키 세션 조회
///
/// 세션이 없으면 `{ "data": null }`을 200으로 반환합니다. 액세스 토큰이 재발급되면
/// `auth_token` 쿠키를 함께 설정합니다.
#[get("/session")]
pub async fn session(req: HttpRequest, context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let access = cookie_value(&req, ACCESS_COOKIE);
    let refresh_cookie = cookie_value(&req, REFRESH_COOKIE);
    let resolved = context
        .session_resolver
        .resolve(access.as_deref(), refresh_cookie.as_deref())
        .await;

    let Some(identity) = resolved.identity else {
        return Ok(HttpResponse::Ok().json(ApiResponse::<AuthenticatedUserResponse>::empty()));
    };

    let mut response = HttpResponse::Ok();
    if let Some(token) = resolved.refreshed_access_token {
        response.cookie(cookies::access_cookie(
            &token,
            context.token_service.access_ttl_seconds(),
            context.auth_config.secure_cookies,
        ));
    }

    Ok(response.json(ApiResponse::success(AuthenticatedUserResponse::from(identity))))
}
