//! Authentication HTTP Handlers (v1)
//!
//! - `POST /api/v1/auth/register` - 셀프 회원가입 (항상 `USER`)
//! - `POST /api/v1/auth/login` - 액세스 토큰만 발급하는 단일 토큰 로그인
//!
//! v1 로그인은 리프레시 토큰을 저장하지 않으므로 5분 뒤에는 다시 로그인해야 합니다.
use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::AppContext;
use crate::domain::dto::tokens::{ApiResponse, LoginRequest, SessionLoginResponse};
use crate::domain::dto::users::RegisterRequest;
use crate::errors::AppError;
use crate::utils::cookies;

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/register`
///
/// # Responses
/// * `201` - `{ "data": { "id", "email", "name" } }`
/// * `400` - 필수 필드 누락 또는 이메일 형식 오류
/// * `409` - 이미 등록된 이메일
#[post("/register")]
pub async fn register(
    context: web::Data<AppContext>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let payload = payload.into_inner();

    let user = context
        .user_service
        .register(&payload.email, &payload.password, payload.name)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(user)))
}

/// 단일 토큰 로그인 핸들러
///
/// 액세스 토큰을 본문의 `token`과 `auth_token` 쿠키로 내려줍니다.
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn session_login(
    context: web::Data<AppContext>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let outcome = context
        .auth_service
        .login_session(&payload.email, &payload.password)
        .await?;

    let cookie = cookies::access_cookie(
        &outcome.access_token,
        context.token_service.access_ttl_seconds(),
        context.auth_config.secure_cookies,
    );

    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse::success(SessionLoginResponse {
        token: outcome.access_token,
        user: outcome.user.into(),
    })))
}
