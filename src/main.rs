mod api;
mod config;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3002".to_string());

    // Variante de schema e origem do users.json resolvidas uma única
    // vez no startup
    let dashboard_config = config::DashboardConfig::from_env();

    log::info!("🚀 Starting User Dashboard Service...");
    log::info!("📄 Users source: {}", dashboard_config.source);
    log::info!("🗂️  Schema variant: {:?}", dashboard_config.variant);
    log::info!(
        "📅 Recency windows: stats {}d, status {}d",
        dashboard_config.recent_login_days,
        dashboard_config.status_recent_days
    );

    let config_data = web::Data::new(dashboard_config);

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(config_data.clone())
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Metrics
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // Dashboard page (HTML)
            .route("/", web::get().to(api::dashboard::get_dashboard))
            // JSON API
            .service(
                web::scope("/api/v1")
                    .route("/users", web::get().to(api::users::get_users))
                    .route("/stats", web::get().to(api::users::get_stats))
                    .route(
                        "/users/{id}/phone",
                        web::get().to(api::users::get_user_phone),
                    ),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
