//! 역할 버전 서비스 메인 애플리케이션
//!
//! 데이터 스토어를 연결하고 서비스 싱글톤을 초기화한 뒤
//! 역할 버전 가드가 적용된 Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use rbac_version_service::caching::redis::RedisClient;
use rbac_version_service::config::{Environment, RateLimitConfig, RbacConfig, ServerConfig, VersionStoreBackend};
use rbac_version_service::core::registry::ServiceLocator;
use rbac_version_service::db::Database;
use rbac_version_service::middlewares::{AuthMiddleware, RolesVersionGuard};
use rbac_version_service::repositories::rbac::AdminActionRepository;
use rbac_version_service::routes::configure_all_routes;
use rbac_version_service::services::{audit::AdminActionLogService, rbac::RolesVersionService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 역할 버전 서비스 시작중... (환경: {:?})", Environment::current());

    // 저장소 장애 정책은 기본값 없이 배포 시 명시해야 한다
    RbacConfig::failure_policy().map_err(io::Error::other)?;

    let backend = RbacConfig::store_backend();
    initialize_data_stores(backend)
        .await
        .map_err(|e| io::Error::other(format!("데이터 스토어 초기화 실패: {}", e)))?;

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    if let Err(e) = AdminActionRepository::instance().create_indexes().await {
        warn!("⚠️ 감사 로그 인덱스 생성 실패: {}", e);
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어 실행 순서 (바깥쪽부터):
/// NormalizePath → Logger → CORS → Governor → AuthMiddleware(optional) → RolesVersionGuard → 라우트
async fn start_http_server() -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let versions = RolesVersionService::instance();
    let audit = AdminActionLogService::instance();
    let guard = RolesVersionGuard::from_config().map_err(io::Error::other)?;
    let environment = Environment::current();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(versions.clone()))
            .app_data(web::Data::from(audit.clone()))

            // 인증 결과를 가드가 읽을 수 있도록 인증 미들웨어를 바깥쪽에 둔다
            .wrap(guard.clone())
            .wrap(AuthMiddleware::optional())

            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&environment))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
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

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=rbac_version_service::middlewares=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 데이터 스토어를 연결하고 `ServiceLocator` 에 등록합니다
///
/// MongoDB 는 감사 로그 때문에 항상 필요하며,
/// Redis 는 역할 버전 저장소로 Redis 를 선택한 경우에만 연결합니다.
async fn initialize_data_stores(backend: VersionStoreBackend) -> Result<(), Box<dyn std::error::Error>> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(Database::new().await?);
    ServiceLocator::set(database);

    if backend == VersionStoreBackend::Redis {
        let redis_client = Arc::new(RedisClient::new().await?);
        ServiceLocator::set(redis_client);
    }

    info!("✅ 역할 버전 저장소 백엔드: {}", backend.as_str());
    Ok(())
}

/// CORS 설정
///
/// 프로덕션이 아닌 환경에서는 로컬 프론트엔드 개발 서버를 허용합니다.
fn configure_cors(environment: &Environment) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600);

    if environment.is_production() {
        return cors;
    }

    cors
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
}
