//! 인증 쿠키
//!
//! 두 쿠키 모두 HTTP-only, `SameSite=Lax`, 경로 `/`이며 운영 환경에서만 `Secure`가 붙습니다.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;

/// 액세스 토큰 쿠키 이름
pub const ACCESS_COOKIE: &str = "auth_token";
/// 리프레시 토큰 쿠키 이름
pub const REFRESH_COOKIE: &str = "refresh_token";

fn build(name: &'static str, value: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

pub fn access_cookie(token: &str, ttl_seconds: i64, secure: bool) -> Cookie<'static> {
    build(ACCESS_COOKIE, token.to_string(), ttl_seconds, secure)
}

pub fn refresh_cookie(token: &str, ttl_seconds: i64, secure: bool) -> Cookie<'static> {
    build(REFRESH_COOKIE, token.to_string(), ttl_seconds, secure)
}

/// 브라우저에서 쿠키를 지우기 위한 빈 값 + max-age 0 쿠키
pub fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    build(name, String::new(), 0, secure)
}

/// 요청 쿠키 값. 빈 값은 없는 것으로 취급합니다.
pub fn cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_access_cookie_attributes() {
        let cookie = access_cookie("abc", 300, true);
        assert_eq!(cookie.name(), "auth_token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(300)));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_cookie(REFRESH_COOKIE, false);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn test_cookie_value_ignores_empty() {
        let req = TestRequest::default()
            .cookie(Cookie::new(ACCESS_COOKIE, ""))
            .cookie(Cookie::new(REFRESH_COOKIE, "r1"))
            .to_http_request();

        assert_eq!(cookie_value(&req, ACCESS_COOKIE), None);
        assert_eq!(cookie_value(&req, REFRESH_COOKIE).as_deref(), Some("r1"));
    }
}
