//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 모든 에러 응답은 다음 형식을 따릅니다:
//!
//! ```json
//! { "error": "token_expired", "message": "토큰이 만료되었습니다. 다시 인증해주세요" }
//! ```
//!
//! `error` 필드는 기계 클라이언트가 분기할 수 있는 안정적인 코드이고,
//! `message`는 사람이 읽기 위한 설명입니다.

use actix_web::http::StatusCode;
use thiserror::Error;

/// 인증/인가 실패 분류
///
/// API 가드는 이 분류를 그대로 응답에 노출하여 클라이언트가
/// 리프레시 엔드포인트를 호출할지, 재로그인할지 결정할 수 있게 합니다.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// 로그인 실패. 이메일과 비밀번호 중 무엇이 틀렸는지 알려주지 않습니다.
    #[error("이메일 또는 비밀번호가 올바르지 않습니다")]
    InvalidCredentials,

    /// 토큰이 전혀 제공되지 않음
    #[error("유효한 인증 토큰이 필요합니다")]
    Unauthenticated,

    /// 서명은 유효하지만 만료됨 (리프레시로 복구 가능)
    #[error("토큰이 만료되었습니다. 다시 인증해주세요")]
    TokenExpired,

    /// 서명 불일치 또는 형식 오류 (복구 불가)
    #[error("유효하지 않은 토큰입니다")]
    TokenInvalid,

    /// 리프레시 토큰 서명/형식/타입 오류
    #[error("리프레시 토큰이 유효하지 않습니다")]
    RefreshInvalid,

    /// 저장된 리프레시 토큰과 불일치 (재로그인 필요)
    #[error("리프레시 토큰이 폐기되었습니다. 다시 로그인해주세요")]
    RefreshRevoked,

    /// 토큰의 subject가 더 이상 존재하지 않음
    #[error("사용자를 찾을 수 없습니다. 다시 로그인해주세요")]
    UserNotFound,

    /// 리프레시 요청에 토큰이 없음
    #[error("리프레시 토큰이 필요합니다")]
    MissingRefreshToken,

    /// 인증은 되었지만 역할이 부족함
    #[error("접근 권한이 부족합니다")]
    Forbidden,
}

impl AuthError {
    /// 응답 본문의 `error` 필드에 사용되는 안정적인 코드
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Unauthenticated => "authentication_required",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenInvalid => "invalid_token",
            AuthError::RefreshInvalid => "invalid_refresh_token",
            AuthError::RefreshRevoked => "refresh_token_revoked",
            AuthError::UserNotFound => "user_not_found",
            AuthError::MissingRefreshToken => "refresh_token_required",
            AuthError::Forbidden => "insufficient_permissions",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::MissingRefreshToken => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증/인가 에러 (401 / 403 / 400)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "database_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::Auth(err) => err.code(),
            AppError::InternalError(_) => "internal_error",
        }
    }

    /// 클라이언트에 노출할 메시지
    ///
    /// 5xx 에러는 내부 정보를 숨기고 일반 메시지만 반환합니다.
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg) => msg.clone(),
            AppError::Auth(err) => err.to_string(),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "내부 서버 오류가 발생했습니다".to_string()
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::Auth(err) => err.status(),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.code(),
                "message": self.public_message()
            }))
    }
}

/// `validator` 검증 실패를 400 응답으로 변환
///
/// 필드별 메시지 중 첫 번째 것들을 모아 하나의 문장으로 만듭니다.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} 값이 올바르지 않습니다", field),
                })
            })
            .collect();
        messages.sort();

        if messages.is_empty() {
            AppError::ValidationError("입력값이 올바르지 않습니다".to_string())
        } else {
            AppError::ValidationError(messages.join(", "))
        }
    }
}

/// 시작 시점 설정 오류
///
/// 요청 단위 에러가 아니라 프로세스를 띄우지 못하게 하는 치명적 오류입니다.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    MissingSecret(&'static str),

    #[error("AUTH_SECRET and REFRESH_SECRET must differ")]
    SharedSecret,
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::body::MessageBody;

    fn body_json(error: &AppError) -> serde_json::Value {
        let bytes = error.error_response().into_body().try_into_bytes().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(AppError::from(AuthError::TokenExpired).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::from(AuthError::RefreshRevoked).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::from(AuthError::Forbidden).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::from(AuthError::MissingRefreshToken).status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_error_body_carries_code() {
        let body = body_json(&AppError::from(AuthError::TokenExpired));
        assert_eq!(body["error"], "token_expired");

        let body = body_json(&AppError::from(AuthError::TokenInvalid));
        assert_eq!(body["error"], "invalid_token");
    }

    #[test]
    fn test_internal_error_hides_details() {
        let body = body_json(&AppError::DatabaseError("connection refused at 10.0.0.3".to_string()));
        assert_eq!(body["error"], "database_error");
        assert!(!body["message"].as_str().unwrap().contains("10.0.0.3"));
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("이미 사용 중인 이메일입니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
        assert_eq!(body_json(&error)["message"], "이미 사용 중인 이메일입니다");
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
