use serde::Serialize;

use crate::domain::models::auth::AuthenticatedUser;

/// API 응답 래퍼
///
/// `data`는 값이 없어도 `null`로 직렬화됩니다.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// 데이터 없이 성공한 응답 (예: 로그인되지 않은 세션 조회)
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// 이중 토큰 로그인 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthenticatedUserResponse,
}

/// 단일 세션 토큰 로그인 응답 (v1)
#[derive(Debug, Serialize)]
pub struct SessionLoginResponse {
    pub token: String,
    pub user: AuthenticatedUserResponse,
}

/// 토큰 갱신 응답
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub user: AuthenticatedUserResponse,
}

/// 클라이언트에 노출하는 현재 사용자 정보
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
}

impl From<AuthenticatedUser> for AuthenticatedUserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.user_id,
            email: user.email,
            name: user.name,
            role: user.role.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::Role;

    #[test]
    fn test_login_response_field_names() {
        let response = ApiResponse::success(LoginResponse {
            access_token: "a".into(),
            refresh_token: "r".into(),
            user: AuthenticatedUser {
                user_id: "id-1".into(),
                email: "a@b.com".into(),
                name: None,
                role: Role::Admin,
            }
            .into(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"]["accessToken"], "a");
        assert_eq!(json["data"]["refreshToken"], "r");
        assert_eq!(json["data"]["user"]["id"], "id-1");
        assert_eq!(json["data"]["user"]["role"], "ADMIN");
    }

    #[test]
    fn test_empty_response_has_null_data() {
        let json = serde_json::to_value(ApiResponse::<()>::empty()).unwrap();
        assert!(json["data"].is_null());
        assert!(json.get("message").is_none());
    }
}
