use serde::Deserialize;
use validator::Validate;

/// 이메일/비밀번호 로그인 요청 DTO
///
/// 필드가 누락되면 빈 문자열로 채워져 검증 단계에서 400으로 거절됩니다.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 토큰 갱신 요청 DTO
///
/// 본문이 없거나 `refreshToken`이 비어 있으면 `refresh_token` 쿠키를 사용합니다.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}
