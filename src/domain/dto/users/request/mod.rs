pub mod auth_request;
pub mod create_user;

pub use auth_request::RegisterRequest;
pub use create_user::{CreateUserRequest, UpdateRoleRequest};
