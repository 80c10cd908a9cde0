pub mod request;
pub mod response;

pub use request::{LoginRequest, RefreshTokenRequest};
pub use response::{ApiResponse, AuthenticatedUserResponse, LoginResponse, RefreshResponse, SessionLoginResponse};
