use mongodb::bson::DateTime;
use serde::Serialize;

use crate::domain::entities::users::user::User;

/// 관리자 화면용 사용자 정보
///
/// 비밀번호 해시와 리프레시 토큰은 포함하지 않습니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    /// RFC 3339 문자열
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email,
            name: user.name,
            role: user.role.as_str().to_string(),
            created_at: format_datetime(user.created_at),
        }
    }
}

/// 회원가입 결과
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl From<User> for RegisteredUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.email,
            name: user.name,
        }
    }
}

fn format_datetime(value: DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}
