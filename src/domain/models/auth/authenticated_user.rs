use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::{Role, User};
use crate::errors::{AppError, AuthError};

/// 요청 단위로 확인된 사용자 신원
///
/// 인증 미들웨어가 요청 extensions에 넣고, 핸들러는 추출자로 꺼내 씁니다.
/// 영속되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (ObjectId 16진수)
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

impl AuthenticatedUser {
    /// 저장된 사용자 레코드에서 신원을 만듭니다. ID가 없는 레코드는 None
    pub fn from_user(user: &User) -> Option<Self> {
        Some(Self {
            user_id: user.id_string()?,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        })
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::from(AuthError::Unauthenticated).into())),
        }
    }
}

/// 선택적 인증 사용자 추출자
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_from_user_requires_id() {
        let mut user = User::new("x@y.com".into(), "h".into(), Some("X".into()), Role::Admin);
        assert!(AuthenticatedUser::from_user(&user).is_none());

        let id = ObjectId::new();
        user.id = Some(id);
        let identity = AuthenticatedUser::from_user(&user).unwrap();
        assert_eq!(identity.user_id, id.to_hex());
        assert_eq!(identity.name.as_deref(), Some("X"));
        assert!(identity.is_admin());
    }

    #[actix_web::test]
    async fn test_extractor_without_identity_is_unauthorized() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let result = AuthenticatedUser::extract(&req).await;
        let err = result.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::UNAUTHORIZED
        );
    }
}
