//! API 라우트 설정 모듈
//!
//! 엔드포인트들을 보안 레벨별로 그룹화하여 등록합니다.
//!
//! # Route Groups
//!
//! - `/health` - 헬스체크 (제한 없음)
//! - `/home` - 쿠키 세션 페이지 게이트
//! - `/api/**` - [`RateLimitMiddleware`] 적용
//!   - `/api/v1/status`, `/api/v1/auth/{register,login}` - 공개
//!   - `/api/v2/auth/{login,refresh,session}` - 공개, `logout`/`me`는 핸들러에서 가드 확인
//!   - `/api/v2/admin/users/**` - `ADMIN` 역할 필요
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(context))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::domain::entities::users::user::Role;
use crate::errors::AppError;
use crate::handlers;
use crate::middlewares::{AuthMiddleware, RateLimitMiddleware};

/// 모든 라우트를 설정합니다
///
/// JSON 본문 파싱 실패도 `AppError::ValidationError` 형식의 400 응답이 되도록
/// `JsonConfig`를 함께 등록합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());

    cfg.service(health_check);
    cfg.service(handlers::pages::home);

    cfg.service(
        web::scope("/api")
            .wrap(RateLimitMiddleware)
            .service(v1_routes())
            .service(v2_auth_routes())
            .service(
                web::scope("/v2/admin/users")
                    .wrap(AuthMiddleware::required_with_role(Role::Admin))
                    .service(handlers::admin_users::list_users)
                    .service(handlers::admin_users::create_user)
                    .service(handlers::admin_users::update_role)
                    .service(handlers::admin_users::delete_user),
            ),
    );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("JSON 본문 파싱 실패: {}", err);
        AppError::ValidationError("요청 본문 형식이 올바르지 않습니다".to_string()).into()
    })
}

/// v1: 상태 확인, 회원가입, 단일 토큰 로그인
fn v1_routes() -> actix_web::Scope {
    web::scope("/v1").service(handlers::status::api_status).service(
        web::scope("/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::session_login),
    )
}

/// v2: 이중 토큰 인증
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v2/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"desk@dealer.test","password":"..."}'
///
/// curl -X POST http://localhost:8080/api/v2/auth/refresh \
///   -H "Content-Type: application/json" \
///   -d '{"refreshToken":"eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."}'
/// ```
fn v2_auth_routes() -> actix_web::Scope {
    web::scope("/v2/auth")
        .service(handlers::token_handlers::login)
        .service(handlers::token_handlers::refresh)
        .service(handlers::token_handlers::logout)
        .service(handlers::token_handlers::me)
        .service(handlers::token_handlers::session)
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "dealer_auth_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::test_support::test_context;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_is_not_rate_limited() {
        let (context, _) = test_context();
        let app = test::init_service(
            App::new().app_data(web::Data::new(context)).configure(configure_all_routes),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(!res.headers().contains_key("x-ratelimit-limit"));
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let (context, _) = test_context();
        let app = test::init_service(
            App::new().app_data(web::Data::new(context)).configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v2/auth/login")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "validation_error");
    }
}
