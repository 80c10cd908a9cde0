pub mod token;

pub use token::{AccessClaims, RefreshClaims, TokenError, ACCESS_CLAIMS_VERSION, REFRESH_TOKEN_TYPE};
