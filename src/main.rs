mod api;
mod config;
mod database;
mod middleware;
mod models;
mod store;
mod utils;
mod validation;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{Config, StoreBackend};
use crate::store::{MemoryUserStore, MongoUserStore, UserStore};
use crate::validation::UserSchema;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting User Service...");

    let store: Arc<dyn UserStore> = match config.store {
        StoreBackend::MongoDB => {
            log::info!(
                "📊 Database: {} ({})",
                utils::redact_uri_credentials(&config.mongodb_uri),
                config.database_name
            );
            let db = database::MongoDB::new(&config.mongodb_uri, &config.database_name)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Failed to connect to MongoDB: {}", e)))?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(MongoUserStore::new(&db))
        }
        StoreBackend::Memory => {
            log::warn!("⚠️  Using in-memory user store; data is lost on restart");
            Arc::new(MemoryUserStore::new())
        }
    };

    let store_data: web::Data<dyn UserStore> = web::Data::from(store);
    let schema_data = web::Data::new(UserSchema::new());

    let bind_address = config.bind_address();
    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    let cors_origins = config.cors_origins.clone();

    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .app_data(store_data.clone())
            .app_data(schema_data.clone())
            .wrap(cors)
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::swagger::ApiDoc::openapi()),
            )
            .route("/health", web::get().to(api::health::health_check))
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            .configure(api::users::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
