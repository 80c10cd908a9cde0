use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// 셀프 회원가입 요청 DTO
///
/// 가입 경로로 생성되는 계정은 항상 `USER` 역할입니다.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,

    #[serde(deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
}
