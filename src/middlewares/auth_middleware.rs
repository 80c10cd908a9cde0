//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를 extensions에 넣습니다.
//! 토큰 검증 자체는 [`guard`](crate::middlewares::guard)에 위임합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::entities::users::user::Role;
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 역할 요구 인증 미들웨어 생성
    pub fn required_with_role(role: Role) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role))
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::test_support::test_context;
    use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    async fn maybe(user: OptionalUser) -> HttpResponse {
        HttpResponse::Ok().body(user.0.map(|u| u.user_id).unwrap_or_else(|| "anonymous".to_string()))
    }

    fn identity(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "65f0c0ffee0000000000beef".to_string(),
            email: "desk@dealer.test".to_string(),
            name: None,
            role,
        }
    }

    #[actix_web::test]
    async fn test_required_mode_rejects_and_accepts() {
        let (context, _) = test_context();
        let token = context.token_service.issue_access_token(&identity(Role::User)).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(context))
                .service(web::scope("/p").wrap(AuthMiddleware::required()).route("", web::get().to(whoami))),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/p").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "authentication_required");

        let req = test::TestRequest::get()
            .uri("/p")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "65f0c0ffee0000000000beef");
    }

    #[actix_web::test]
    async fn test_role_requirement_forbids() {
        let (context, _) = test_context();
        let token = context.token_service.issue_access_token(&identity(Role::User)).unwrap();
        let app = test::init_service(
            App::new().app_data(web::Data::new(context)).service(
                web::scope("/admin")
                    .wrap(AuthMiddleware::required_with_role(Role::Admin))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "insufficient_permissions");
    }

    #[actix_web::test]
    async fn test_optional_mode_passes_through() {
        let (context, _) = test_context();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(context))
                .service(web::scope("/o").wrap(AuthMiddleware::optional()).route("", web::get().to(maybe))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/o")
            .insert_header((AUTHORIZATION, "Bearer tampered"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }
}
