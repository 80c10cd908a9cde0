//! # Authentication Configuration Module
//!
//! 액세스/리프레시 JWT 서명 키와 토큰 수명, 쿠키 보안 플래그를 관리합니다.
//!
//! 설정은 프로세스 시작 시 한 번만 읽어 [`AuthConfig`] 값으로 고정되고,
//! 이후에는 [`crate::core::AppContext`]를 통해 필요한 서비스에 주입됩니다.
//! 요청 처리 중에 환경 변수를 다시 읽지 않습니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export AUTH_SECRET="access-token-signing-secret"
//! export REFRESH_SECRET="refresh-token-signing-secret"
//! export ACCESS_TOKEN_TTL_SECONDS="300"   # 기본 5분
//! export REFRESH_TOKEN_TTL_DAYS="7"       # 기본 7일
//! ```
//!
//! 프로덕션이 아닌 환경에서 서명 키가 없으면 시작 시점에 32바이트 무작위 키를
//! 생성합니다. 이 경우 재시작하면 모든 기존 세션이 무효화됩니다.
//! 프로덕션에서 서명 키가 없으면 [`ConfigError`]로 시작이 중단됩니다.

use std::env;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use crate::config::Environment;
use crate::errors::ConfigError;

const DEFAULT_ACCESS_TTL_SECONDS: i64 = 5 * 60;
const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

/// 토큰 서명 및 세션 쿠키 설정
#[derive(Clone)]
pub struct AuthConfig {
    /// 액세스 토큰 HS256 서명 키
    pub access_secret: String,
    /// 리프레시 토큰 HS256 서명 키 (액세스 키와 별개)
    pub refresh_secret: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_days: i64,
    /// 쿠키에 `Secure` 플래그를 붙일지 여부 (프로덕션에서만 true)
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// 프로세스 환경 변수로부터 인증 설정을 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `environment` - 현재 실행 환경
    ///
    /// # Errors
    ///
    /// * `ConfigError::MissingSecret` - 프로덕션에서 서명 키 누락
    /// * `ConfigError::SharedSecret` - 프로덕션에서 두 서명 키가 동일
    pub fn from_env(environment: &Environment) -> Result<Self, ConfigError> {
        Self::from_lookup(environment, |key| env::var(key).ok())
    }

    /// 임의의 키-값 조회 함수로부터 설정을 생성합니다.
    ///
    /// 테스트에서 프로세스 환경을 건드리지 않고 설정을 만들 때 사용합니다.
    pub fn from_lookup<F>(environment: &Environment, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_production = environment.is_production();

        let access_secret = resolve_secret("AUTH_SECRET", &lookup, is_production)?;
        let refresh_secret = resolve_secret("REFRESH_SECRET", &lookup, is_production)?;

        if is_production && access_secret == refresh_secret {
            return Err(ConfigError::SharedSecret);
        }

        let access_ttl_seconds = lookup("ACCESS_TOKEN_TTL_SECONDS")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_ACCESS_TTL_SECONDS);

        let refresh_ttl_days = lookup("REFRESH_TOKEN_TTL_DAYS")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_REFRESH_TTL_DAYS);

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl_seconds,
            refresh_ttl_days,
            secure_cookies: is_production,
        })
    }

    /// 고정된 키로 설정을 만듭니다. 기본 수명이 적용되고 `Secure` 플래그는 꺼집니다.
    pub fn with_secrets(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl_seconds: DEFAULT_ACCESS_TTL_SECONDS,
            refresh_ttl_days: DEFAULT_REFRESH_TTL_DAYS,
            secure_cookies: false,
        }
    }

    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_days * 24 * 60 * 60
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

fn resolve_secret<F>(key: &'static str, lookup: &F, is_production: bool) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(secret) => Ok(secret),
        None if is_production => Err(ConfigError::MissingSecret(key)),
        None => {
            log::warn!("{} 미설정 - 무작위 개발용 키를 생성합니다 (재시작 시 세션 무효화)", key);
            Ok(generate_secret())
        }
    }
}

/// 32바이트 무작위 키를 URL-safe base64 문자열로 생성합니다.
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
