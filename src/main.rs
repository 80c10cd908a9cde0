//! 딜러 백오피스 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다. 설정 → 저장소 → 서비스 순서로
//! [`AppContext`]를 한 번 만들고 모든 워커가 공유합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use dealer_auth_service::config::{
    AuthConfig, Environment, PasswordConfig, RateLimitConfig, ServerConfig, StoreBackend,
};
use dealer_auth_service::core::AppContext;
use dealer_auth_service::db::Database;
use dealer_auth_service::middlewares::rate_limit::spawn_cleanup_task;
use dealer_auth_service::repositories::users::{InMemoryUserStore, UserRepository, UserStore};
use dealer_auth_service::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    let environment = Environment::current();
    info!("🚀 딜러 인증 서비스 시작중... (environment: {:?})", environment);

    // 비밀 키는 요청을 받기 전에 한 번만 결정
    let auth_config = AuthConfig::from_env(&environment).map_err(|e| {
        error!("인증 설정 오류: {}", e);
        io::Error::other(e.to_string())
    })?;

    let user_store = initialize_user_store().await?;
    let rate_limit_config = RateLimitConfig::from_env();

    let context = AppContext::new(
        auth_config,
        user_store,
        PasswordConfig::bcrypt_cost(),
        rate_limit_config,
    );

    spawn_cleanup_task(context.rate_limiter.clone());
    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(context).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화 미들웨어를 포함합니다. 요청 제한은 `/api` 스코프에서만 적용됩니다.
async fn start_http_server(context: AppContext) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let data = web::Data::new(context);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 표준 에러로 출력
    let result = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        _ => dotenv().map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e);
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=dealer_auth_service::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// `STORE_BACKEND`에 따라 사용자 저장소를 생성합니다
///
/// MongoDB 연결이나 인덱스 생성에 실패하면 서버를 띄우지 않습니다.
async fn initialize_user_store() -> io::Result<Arc<dyn UserStore>> {
    match StoreBackend::current() {
        StoreBackend::Memory => {
            info!("🧪 메모리 사용자 저장소 사용 (재시작 시 데이터 소실)");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
        StoreBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::new().await.map_err(|e| {
                error!("데이터베이스 연결 실패: {}", e);
                io::Error::other(e.to_string())
            })?;
            info!("✅ MongoDB 연결 성공 ({})", database.database_name());

            let repository = UserRepository::new(database);
            repository.create_indexes().await.map_err(|e| {
                error!("인덱스 생성 실패: {}", e);
                io::Error::other(e.to_string())
            })?;

            Ok(Arc::new(repository))
        }
    }
}

/// CORS 설정을 구성합니다
///
/// 쿠키 기반 세션을 위해 자격 증명을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
