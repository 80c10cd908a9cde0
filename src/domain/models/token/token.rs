//! JWT 인증 토큰 클레임 구조체
//!
//! 액세스 토큰과 리프레시 토큰은 서로 다른 키로 서명되고 클레임 구조도 다릅니다.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::users::user::Role;
use crate::domain::models::auth::AuthenticatedUser;

/// 현재 액세스 토큰 클레임 구조 버전
///
/// 새로 발급하는 토큰에 기록됩니다. 이전 구조 판정은 `role` 유무로만 합니다.
pub const ACCESS_CLAIMS_VERSION: u32 = 2;

/// 리프레시 토큰의 `type` 클레임 값
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// 액세스 토큰 클레임
///
/// - `sub`: 사용자 ID
/// - `email`, `name`, `role`: 매 요청마다 저장소를 조회하지 않도록 함께 담는 신원 정보
/// - `ver`: 클레임 구조 버전
/// - `iat`, `exp`: 발급/만료 시간 (Unix timestamp, 초)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 이전 구조의 토큰에는 없을 수 있음
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<u32>,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    /// 역할 정보가 없는 이전 구조 토큰인지 확인
    ///
    /// `ver`가 없어도 `role`이 있으면 현재 구조로 봅니다.
    pub fn is_legacy(&self) -> bool {
        self.role.is_none()
    }

    /// 현재 구조의 클레임에서 신원을 만듭니다. 이전 구조이면 None
    pub fn identity(&self) -> Option<AuthenticatedUser> {
        if self.is_legacy() {
            return None;
        }

        Some(AuthenticatedUser {
            user_id: self.sub.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role?,
        })
    }
}

/// 리프레시 토큰 클레임
///
/// 신원 정보는 담지 않고 subject만 가집니다. 역할과 이름은 갱신 시
/// 저장소에서 다시 읽습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    #[serde(rename = "type")]
    pub token_type: String,
    /// 같은 초에 발급된 두 리프레시 토큰을 구분하는 무작위 값
    #[serde(default)]
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// 토큰 검증 실패 분류
///
/// 만료는 서명이 유효한 경우에만 보고됩니다.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token invalid")]
    Invalid,
}
