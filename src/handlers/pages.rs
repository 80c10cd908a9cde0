//! 쿠키 세션 기반 페이지 게이트
//!
//! 서버 렌더링 페이지 앞단에서 [`SessionResolver`](crate::services::auth::SessionResolver)로
//! 세션을 확인합니다. 세션이 없으면 `/login`으로 리다이렉트합니다.
use actix_web::http::header::LOCATION;
use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::core::AppContext;
use crate::domain::dto::tokens::{ApiResponse, AuthenticatedUserResponse};
use crate::utils::cookies::{self, cookie_value, ACCESS_COOKIE, REFRESH_COOKIE};

pub const LOGIN_PATH: &str = "/login";

/// 홈 화면
///
/// 액세스 토큰이 만료되었어도 유효한 리프레시 쿠키가 있으면 새 `auth_token` 쿠키와 함께 통과합니다.
#[get("/home")]
pub async fn home(req: HttpRequest, context: web::Data<AppContext>) -> HttpResponse {
    let access = cookie_value(&req, ACCESS_COOKIE);
    let refresh = cookie_value(&req, REFRESH_COOKIE);
    let session = context
        .session_resolver
        .resolve(access.as_deref(), refresh.as_deref())
        .await;

    let Some(identity) = session.identity else {
        return HttpResponse::Found().insert_header((LOCATION, LOGIN_PATH)).finish();
    };

    let mut response = HttpResponse::Ok();
    if let Some(token) = session.refreshed_access_token {
        response.cookie(cookies::access_cookie(
            &token,
            context.token_service.access_ttl_seconds(),
            context.auth_config.secure_cookies,
        ));
    }

    response.json(ApiResponse::success(AuthenticatedUserResponse::from(identity)))
}
