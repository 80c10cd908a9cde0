//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인의 횡단 관심사를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 인증 미들웨어 (AuthMiddleware)
//! - Bearer 헤더 또는 `auth_token` 쿠키의 액세스 토큰 검증 ([`guard`])
//! - 사용자 정보를 request extension에 저장
//! - 선택적/강제 인증 모드와 역할 요구사항 지원
//! - 실패 종류별 응답 코드 (`authentication_required`, `token_expired`, `invalid_token`, `insufficient_permissions`)
//!
//! ### 2. 요청 제한 미들웨어 (RateLimitMiddleware)
//! - 클라이언트 IP별 고정 윈도우, 추적 IP 수 상한
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(web::Data::new(context))
//!     .service(
//!         web::scope("/api")
//!             .wrap(RateLimitMiddleware)
//!             .service(
//!                 web::scope("/v2/admin")
//!                     .wrap(AuthMiddleware::required_with_role(Role::Admin))
//!                     .route("/users", web::get().to(list_users))
//!             )
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;
pub mod guard;
pub mod rate_limit;

pub use auth_middleware::AuthMiddleware;
pub use rate_limit::{RateLimitMiddleware, RateLimiter};
