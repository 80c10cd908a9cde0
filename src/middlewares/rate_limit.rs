//! IP 기준 고정 윈도우 요청 제한
//!
//! `/api` 스코프에 적용됩니다. 클라이언트 IP마다 윈도우 시작 시각과 요청 수를 기록하고,
//! 한도를 넘으면 429를 반환합니다.
//!
//! 추적하는 IP 수에는 상한이 있습니다. 가득 차면 만료된 윈도우를 먼저 정리하고,
//! 그래도 자리가 없으면 가장 오래된 윈도우를 제거합니다. 주기적인 정리 작업은
//! [`spawn_cleanup_task`]로 시작합니다.

use std::collections::{BTreeSet, HashMap};
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;
use parking_lot::Mutex;

use crate::config::RateLimitConfig;
use crate::core::AppContext;

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_start_ms: i64,
}

/// IP별 윈도우와 윈도우 시작 시각 순서 인덱스
///
/// `by_start`는 항상 `windows`와 같은 항목을 `(window_start_ms, ip)` 순서로 가집니다.
/// 만료 정리와 가장 오래된 항목 제거가 앞에서부터 꺼내는 것으로 끝납니다.
#[derive(Debug, Default)]
struct WindowTracker {
    windows: HashMap<String, WindowEntry>,
    by_start: BTreeSet<(i64, String)>,
}

impl WindowTracker {
    fn len(&self) -> usize {
        self.windows.len()
    }

    fn contains(&self, ip: &str) -> bool {
        self.windows.contains_key(ip)
    }

    fn start_window(&mut self, ip: &str, now_ms: i64) {
        if let Some(previous) = self.windows.insert(
            ip.to_string(),
            WindowEntry {
                count: 0,
                window_start_ms: now_ms,
            },
        ) {
            self.by_start.remove(&(previous.window_start_ms, ip.to_string()));
        }
        self.by_start.insert((now_ms, ip.to_string()));
    }

    /// 만료된 윈도우를 앞에서부터 제거하고 제거한 개수를 반환합니다.
    fn remove_expired(&mut self, now_ms: i64, window_ms: i64) -> usize {
        let mut removed = 0;
        while let Some((start, _)) = self.by_start.first() {
            if now_ms - *start <= window_ms {
                break;
            }
            if let Some((_, ip)) = self.by_start.pop_first() {
                self.windows.remove(&ip);
                removed += 1;
            }
        }
        removed
    }

    fn evict_oldest(&mut self) {
        if let Some((_, ip)) = self.by_start.pop_first() {
            log::debug!("요청 제한 추적 상한 도달, 가장 오래된 항목 제거: {}", ip);
            self.windows.remove(&ip);
        }
    }
}

/// 한 요청에 대한 판정 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// 현재 윈도우가 끝나는 시각 (Unix epoch, 밀리초)
    pub reset_at_ms: i64,
}

#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    tracker: Mutex<WindowTracker>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            tracker: Mutex::new(WindowTracker::default()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn window_ms(&self) -> i64 {
        (self.config.window_seconds as i64).saturating_mul(1000)
    }

    pub fn check(&self, ip: &str) -> RateLimitInfo {
        self.check_at(ip, Utc::now().timestamp_millis())
    }

    /// `now_ms` 시점의 요청 하나를 기록하고 허용 여부를 반환합니다.
    pub fn check_at(&self, ip: &str, now_ms: i64) -> RateLimitInfo {
        let window_ms = self.window_ms();
        let limit = self.config.max_requests;
        let mut tracker = self.tracker.lock();

        let expired = tracker
            .windows
            .get(ip)
            .map(|entry| now_ms - entry.window_start_ms > window_ms);

        match expired {
            Some(false) => {}
            Some(true) => tracker.start_window(ip, now_ms),
            None => {
                if tracker.len() >= self.config.max_tracked_ips {
                    tracker.remove_expired(now_ms, window_ms);
                    if tracker.len() >= self.config.max_tracked_ips {
                        tracker.evict_oldest();
                    }
                }
                tracker.start_window(ip, now_ms);
            }
        }

        let Some(entry) = tracker.windows.get_mut(ip) else {
            return RateLimitInfo {
                allowed: true,
                limit,
                remaining: limit,
                reset_at_ms: now_ms + window_ms,
            };
        };

        let reset_at_ms = entry.window_start_ms + window_ms;

        if entry.count >= limit {
            return RateLimitInfo {
                allowed: false,
                limit,
                remaining: 0,
                reset_at_ms,
            };
        }

        entry.count += 1;
        RateLimitInfo {
            allowed: true,
            limit,
            remaining: limit - entry.count,
            reset_at_ms,
        }
    }

    /// 만료된 윈도우를 제거하고 제거한 개수를 반환합니다.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now().timestamp_millis())
    }

    pub fn sweep_expired_at(&self, now_ms: i64) -> usize {
        let window_ms = self.window_ms();
        self.tracker.lock().remove_expired(now_ms, window_ms)
    }

    /// 현재 추적 중인 IP 수
    pub fn len(&self) -> usize {
        self.tracker.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn is_tracked(&self, ip: &str) -> bool {
        self.tracker.lock().contains(ip)
    }
}

/// 클라이언트 IP 결정
///
/// `X-Forwarded-For` 첫 번째 값, `X-Real-IP`, 연결 주소 순서로 확인하고
/// 모두 없으면 `127.0.0.1`을 사용합니다.
pub fn client_ip(req: &HttpRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

fn apply_headers(headers: &mut HeaderMap, info: &RateLimitInfo) {
    headers.insert(HeaderName::from_static("x-ratelimit-limit"), HeaderValue::from(info.limit));
    headers.insert(HeaderName::from_static("x-ratelimit-remaining"), HeaderValue::from(info.remaining));
    headers.insert(HeaderName::from_static("x-ratelimit-reset"), HeaderValue::from(info.reset_at_ms));
}

/// 주기적으로 만료된 윈도우를 정리하는 백그라운드 작업
pub fn spawn_cleanup_task(limiter: Arc<RateLimiter>) {
    let interval_seconds = limiter.config().cleanup_interval_seconds.max(1);
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(interval_seconds));
        loop {
            interval.tick().await;
            let removed = limiter.sweep_expired();
            if removed > 0 {
                log::debug!("요청 제한 정리: {}개 제거, {}개 추적 중", removed, limiter.len());
            }
        }
    });
}

/// 요청 제한 미들웨어
///
/// 제한기는 `web::Data<AppContext>`에서 가져옵니다.
pub struct RateLimitMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let Some(context) = req.app_data::<web::Data<AppContext>>().cloned() else {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            };

            let ip = client_ip(req.request());
            let info = context.rate_limiter.check(&ip);

            if !info.allowed {
                log::warn!("요청 제한 초과: ip={} path={}", ip, req.path());
                let mut response = HttpResponse::TooManyRequests().json(serde_json::json!({
                    "success": false,
                    "message": "Too many requests"
                }));
                apply_headers(response.headers_mut(), &info);
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let mut res = service.call(req).await?;
            apply_headers(res.headers_mut(), &info);
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::test_support::test_context_with_rate_limit;
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::App;

    fn config(max_requests: u32, max_tracked_ips: usize) -> RateLimitConfig {
        RateLimitConfig {
            max_requests,
            window_seconds: 60,
            max_tracked_ips,
            cleanup_interval_seconds: 60,
        }
    }

    #[test]
    fn test_blocks_after_limit_within_window() {
        let limiter = RateLimiter::new(config(3, 100));
        let t0 = 1_700_000_000_000;

        for expected_remaining in [2, 1, 0] {
            let info = limiter.check_at("10.0.0.1", t0);
            assert!(info.allowed);
            assert_eq!(info.remaining, expected_remaining);
            assert_eq!(info.reset_at_ms, t0 + 60_000);
        }

        let blocked = limiter.check_at("10.0.0.1", t0 + 1_000);
        assert!(!blocked.allowed);
        assert_eq!(blocked.remaining, 0);

        assert!(limiter.check_at("10.0.0.2", t0 + 1_000).allowed);
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let limiter = RateLimiter::new(config(1, 100));
        let t0 = 1_700_000_000_000;

        assert!(limiter.check_at("10.0.0.1", t0).allowed);
        assert!(!limiter.check_at("10.0.0.1", t0 + 60_000).allowed);

        let info = limiter.check_at("10.0.0.1", t0 + 60_001);
        assert!(info.allowed);
        assert_eq!(info.reset_at_ms, t0 + 60_001 + 60_000);
    }

    #[test]
    fn test_tracker_stays_bounded() {
        let limiter = RateLimiter::new(config(5, 3));
        let t0 = 1_700_000_000_000;

        for i in 0..50 {
            limiter.check_at(&format!("10.0.1.{}", i), t0 + i);
        }
        assert_eq!(limiter.len(), 3);

        // 가장 오래된 항목부터 밀려남
        assert!(limiter.is_tracked("10.0.1.49"));
        assert!(limiter.is_tracked("10.0.1.48"));
        assert!(!limiter.is_tracked("10.0.1.0"));
    }

    #[test]
    fn test_full_tracker_prefers_sweeping_expired() {
        let limiter = RateLimiter::new(config(5, 2));
        let t0 = 1_700_000_000_000;

        limiter.check_at("old", t0);
        limiter.check_at("recent", t0 + 50_000);
        limiter.check_at("new", t0 + 70_000);

        assert!(!limiter.is_tracked("old"));
        assert!(limiter.is_tracked("recent"));
        assert!(limiter.is_tracked("new"));
    }

    #[test]
    fn test_restarted_window_is_not_evicted_first() {
        let limiter = RateLimiter::new(config(5, 2));
        let t0 = 1_700_000_000_000;

        limiter.check_at("returning", t0);
        limiter.check_at("steady", t0 + 30_000);
        // 윈도우가 만료되어 새로 시작하면 순서상 가장 뒤로 이동
        limiter.check_at("returning", t0 + 61_000);
        limiter.check_at("newcomer", t0 + 62_000);

        assert_eq!(limiter.len(), 2);
        assert!(limiter.is_tracked("returning"));
        assert!(limiter.is_tracked("newcomer"));
        assert!(!limiter.is_tracked("steady"));
    }

    #[test]
    fn test_sweep_expired() {
        let limiter = RateLimiter::new(config(5, 100));
        let t0 = 1_700_000_000_000;
        limiter.check_at("a", t0);
        limiter.check_at("b", t0 + 30_000);

        assert_eq!(limiter.sweep_expired_at(t0 + 70_000), 1);
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn test_client_ip_resolution() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_ip(&req), "203.0.113.7");

        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_ip(&req), "198.51.100.2");

        let req = TestRequest::default()
            .peer_addr("192.0.2.10:5000".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req), "192.0.2.10");

        let req = TestRequest::default().to_http_request();
        assert_eq!(client_ip(&req), "127.0.0.1");
    }

    #[actix_web::test]
    async fn test_middleware_headers_and_429() {
        let (context, _) = test_context_with_rate_limit(config(2, 100));
        let app = init_service(
            App::new().app_data(web::Data::new(context)).service(
                web::scope("/api")
                    .wrap(RateLimitMiddleware)
                    .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let request = || {
            TestRequest::get()
                .uri("/api/ping")
                .insert_header(("X-Forwarded-For", "203.0.113.9"))
                .to_request()
        };

        let res = call_service(&app, request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("x-ratelimit-limit").unwrap(), "2");
        assert_eq!(res.headers().get("x-ratelimit-remaining").unwrap(), "1");
        assert!(res.headers().contains_key("x-ratelimit-reset"));

        call_service(&app, request()).await;
        let res = call_service(&app, request()).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        let body: serde_json::Value = read_body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Too many requests");
    }
}
