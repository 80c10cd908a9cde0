//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 사용자 저장소, 서버 바인딩, 패스워드 해싱, 요청 빈도 제한 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 서명 키 필수, `Secure` 쿠키
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "production".to_string());

        Self::from_str(&raw)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 환경 이름 문자열 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// 해당하는 Environment 값. 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// 사용자 저장소 백엔드 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB `users` 컬렉션
    Mongo,
    /// 프로세스 메모리 (로컬 개발용, 재시작 시 초기화)
    Memory,
}

impl StoreBackend {
    /// `STORE_BACKEND` 환경 변수를 읽습니다. 기본값은 `Mongo`입니다.
    pub fn current() -> Self {
        match env::var("STORE_BACKEND").map(|v| v.to_lowercase()).as_deref() {
            Ok("memory") | Ok("in-memory") => StoreBackend::Memory,
            _ => StoreBackend::Mongo,
        }
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위로 설정되어 있으면 그 값을 우선 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// # Environment Defaults
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging/Production: 10 (기존 저장된 해시와 동일한 비용)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 10,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다.
    ///
    /// # Returns
    ///
    /// 포트 번호. 기본값: 8080
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다.
    ///
    /// # Returns
    ///
    /// 호스트 주소. 기본값: "0.0.0.0" (모든 인터페이스)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}

/// IP 단위 고정 윈도우 요청 빈도 제한 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// 윈도우당 허용 요청 수
    pub max_requests: u32,
    pub window_seconds: u64,
    /// 동시에 추적하는 IP 최대 개수
    pub max_tracked_ips: usize,
    /// 만료 윈도우 정리 주기
    pub cleanup_interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window_seconds: 60,
            max_tracked_ips: 10_000,
            cleanup_interval_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    /// 환경변수에서 설정을 로드합니다.
    ///
    /// * `RATE_LIMIT_MAX` - 윈도우당 허용 요청 수 (기본값: 20)
    /// * `RATE_LIMIT_WINDOW_SECONDS` - 윈도우 길이 (기본값: 60)
    /// * `RATE_LIMIT_MAX_TRACKED_IPS` - 추적 IP 상한 (기본값: 10000)
    /// * `RATE_LIMIT_CLEANUP_SECONDS` - 정리 주기 (기본값: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_requests: parse_positive("RATE_LIMIT_MAX", defaults.max_requests),
            window_seconds: parse_positive("RATE_LIMIT_WINDOW_SECONDS", defaults.window_seconds),
            max_tracked_ips: parse_positive("RATE_LIMIT_MAX_TRACKED_IPS", defaults.max_tracked_ips),
            cleanup_interval_seconds: parse_positive(
                "RATE_LIMIT_CLEANUP_SECONDS",
                defaults.cleanup_interval_seconds,
            ),
        }
    }
}

fn parse_positive<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + PartialOrd + Default + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => value,
            _ => {
                log::error!("{} 파싱 실패: {:?}. 기본값 {} 사용", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
