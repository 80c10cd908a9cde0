//! # Core Module
//!
//! 애플리케이션 조립 지점입니다.
//!
//! ### [`context`] - 의존성 컨테이너
//! - **AppContext**: 설정 → 저장소 → 서비스 순서로 한 번 생성되어 `web::Data`로 공유
//! - 전역 싱글톤이나 지연 초기화된 전역 상태 없이 모든 의존성이 명시적으로 주입됩니다
//!
//! ```rust,ignore
//! let context = AppContext::new(auth_config, user_store, bcrypt_cost, rate_limit_config);
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::new(context.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod context;

pub use context::AppContext;
