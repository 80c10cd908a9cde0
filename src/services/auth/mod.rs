pub mod token_service;
pub mod auth_service;
pub mod session_resolver;

pub use token_service::TokenService;
pub use auth_service::{AuthService, LoginOutcome, RefreshOutcome, SessionOutcome};
pub use session_resolver::{ResolvedSession, SessionResolver};
