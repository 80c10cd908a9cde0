//! 저장소 연결 상태 엔드포인트
use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::core::AppContext;

/// `GET /api/v1/status`
///
/// 저장소 ping에 성공하면 200, 실패하면 503을 반환합니다.
#[get("/status")]
pub async fn api_status(context: web::Data<AppContext>) -> HttpResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    match context.user_store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "message": "API is running and database is connected",
            "timestamp": timestamp
        })),
        Err(e) => {
            log::error!("저장소 상태 확인 실패: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "error",
                "message": "Database connection failed",
                "timestamp": timestamp
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::context::test_support::test_context;
    use crate::routes::configure_all_routes;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn test_status_ok_with_memory_store() {
        let (context, _) = test_context();
        let app = test::init_service(
            App::new().app_data(web::Data::new(context)).configure(configure_all_routes),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/api/v1/status").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-ratelimit-limit"));
    }
}
