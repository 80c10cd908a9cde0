//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 발급과 검증을 담당합니다.
//! 두 토큰은 서로 다른 HS256 키로 서명되므로 한쪽 키로 서명된 토큰은
//! 다른 쪽 검증에서 항상 실패합니다.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;

use crate::config::AuthConfig;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::{
    AccessClaims, RefreshClaims, TokenError, ACCESS_CLAIMS_VERSION, REFRESH_TOKEN_TYPE,
};
use crate::errors::{AppResult, ErrorContext};

/// JWT 토큰 관리 서비스
///
/// 시작 시점에 [`AuthConfig`]로 한 번 생성되어 공유됩니다.
#[derive(Clone)]
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 만료 시각이 지나면 즉시 만료로 판정
        validation.leeway = 0;

        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl_seconds: config.access_ttl_seconds,
            refresh_ttl_seconds: config.refresh_ttl_seconds(),
            validation,
        }
    }

    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }

    /// 사용자를 위한 액세스 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `user` - 토큰에 담을 사용자 신원 (ID, 이메일, 이름, 역할)
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    pub fn issue_access_token(&self, user: &AuthenticatedUser) -> AppResult<String> {
        self.issue_access_token_at(user, Utc::now().timestamp())
    }

    pub(crate) fn issue_access_token_at(
        &self,
        user: &AuthenticatedUser,
        issued_at: i64,
    ) -> AppResult<String> {
        let claims = AccessClaims {
            sub: user.user_id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: Some(user.role),
            ver: Some(ACCESS_CLAIMS_VERSION),
            iat: issued_at,
            exp: issued_at + self.access_ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding)
            .context("JWT 토큰 생성 실패")
    }

    /// 리프레시 토큰 생성
    ///
    /// subject와 토큰 타입, 무작위 `jti`만 담습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    pub fn issue_refresh_token(&self, user_id: &str) -> AppResult<String> {
        self.issue_refresh_token_at(user_id, Utc::now().timestamp())
    }

    pub(crate) fn issue_refresh_token_at(&self, user_id: &str, issued_at: i64) -> AppResult<String> {
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            token_type: REFRESH_TOKEN_TYPE.to_string(),
            jti: generate_jti(),
            iat: issued_at,
            exp: issued_at + self.refresh_ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)
            .context("리프레시 토큰 생성 실패")
    }

    /// 액세스 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `TokenError::Expired` - 서명은 유효하지만 만료됨
    /// * `TokenError::Invalid` - 서명 불일치, 형식 오류 등 그 외 모든 실패
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.access_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)
    }

    /// 리프레시 토큰 검증 및 클레임 추출
    ///
    /// `type` 클레임이 `refresh`가 아니면 서명이 유효해도 `Invalid`입니다.
    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let claims = decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)?;

        if claims.token_type != REFRESH_TOKEN_TYPE {
            return Err(TokenError::Invalid);
        }

        Ok(claims)
    }

    /// 실패 사유가 필요 없는 호출자를 위한 리프레시 토큰 검증
    ///
    /// 어떤 입력에도 패닉하지 않고 실패 시 None을 반환합니다.
    pub fn verify_refresh_token(&self, token: &str) -> Option<RefreshClaims> {
        self.decode_refresh_token(token).ok()
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    /// 접두사가 없거나 토큰이 비어 있으면 None을 반환합니다.
    pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

fn classify(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}

fn generate_jti() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
