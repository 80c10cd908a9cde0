//! # 관리자용 사용자 관리 HTTP 핸들러
//!
//! 모든 라우트는 `AuthMiddleware::required_with_role(Role::Admin)`로 보호됩니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/v2/admin/users` | 사용자 목록 (최신 생성 순) | 200 |
//! | `POST` | `/api/v2/admin/users` | 역할 지정 사용자 생성 | 201 / 400 / 409 |
//! | `PATCH` | `/api/v2/admin/users/{id}` | 역할 변경 (자기 자신 불가) | 200 / 400 / 404 |
//! | `DELETE` | `/api/v2/admin/users/{id}` | 사용자 삭제 (자기 자신 불가) | 200 / 400 / 404 |
use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;

use crate::core::AppContext;
use crate::domain::dto::tokens::ApiResponse;
use crate::domain::dto::users::{CreateUserRequest, UpdateRoleRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::users::NewUser;

#[get("")]
pub async fn list_users(context: web::Data<AppContext>) -> Result<HttpResponse, AppError> {
    let users = context.user_service.list_users().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

#[post("")]
pub async fn create_user(
    admin: AuthenticatedUser,
    context: web::Data<AppContext>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let role = payload.requested_role();
    let payload = payload.into_inner();

    let user = context
        .user_service
        .create_user(NewUser {
            email: payload.email,
            password: payload.password,
            name: payload.name,
            role,
        })
        .await?;

    log::info!("관리자 {}가 사용자 {} 생성", admin.user_id, user.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(user)))
}

#[patch("/{id}")]
pub async fn update_role(
    admin: AuthenticatedUser,
    context: web::Data<AppContext>,
    path: web::Path<String>,
    payload: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, AppError> {
    let role = payload.parse_role()?;
    let user = context
        .user_service
        .update_role(&admin.user_id, &path.into_inner(), role)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

#[delete("/{id}")]
pub async fn delete_user(
    admin: AuthenticatedUser,
    context: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    context
        .user_service
        .delete_user(&admin.user_id, &path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("사용자가 삭제되었습니다")))
}
