//! # 관리자용 사용자 관리 요청 DTO

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::users::user::Role;
use crate::errors::AppError;
use crate::utils::string_utils::deserialize_optional_string;

/// 관리자가 사용자 계정을 직접 생성하는 요청
///
/// `role`이 정확히 `"ADMIN"`일 때만 관리자 계정이 되고, 그 외 값이나 누락은 `USER`입니다.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,

    #[serde(deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,

    pub role: Option<String>,
}

impl CreateUserRequest {
    pub fn requested_role(&self) -> Role {
        match self.role.as_deref() {
            Some("ADMIN") => Role::Admin,
            _ => Role::User,
        }
    }
}

/// 사용자 역할 변경 요청
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRoleRequest {
    pub role: Option<String>,
}

impl UpdateRoleRequest {
    /// `USER` 또는 `ADMIN`만 허용합니다.
    pub fn parse_role(&self) -> Result<Role, AppError> {
        self.role
            .as_deref()
            .and_then(|role| role.parse::<Role>().ok())
            .ok_or_else(|| AppError::ValidationError("유효하지 않은 역할입니다".to_string()))
    }
}
