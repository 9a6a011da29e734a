use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::store::UserStore;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "User store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn UserStore>) -> impl Responder {
    let (status, mut response) = match store.ping().await {
        Ok(()) => ("healthy", HttpResponse::Ok()),
        Err(e) => {
            log::warn!("⚠️  Health check failed: {}", e);
            ("unhealthy", HttpResponse::ServiceUnavailable())
        }
    };

    response.json(HealthResponse {
        status: status.to_string(),
        service: "user-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, UserFields};
    use crate::store::{MemoryUserStore, StoreError};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use std::sync::Arc;

    /// Store that cannot be reached.
    struct UnreachableStore;

    #[async_trait]
    impl UserStore for UnreachableStore {
        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("no route to host".into()))
        }
        async fn create(&self, _: UserFields) -> Result<User, StoreError> {
            unreachable!()
        }
        async fn find(&self, _: u64, _: Option<i64>) -> Result<Vec<User>, StoreError> {
            unreachable!()
        }
        async fn find_by_id(&self, _: &ObjectId) -> Result<Option<User>, StoreError> {
            unreachable!()
        }
        async fn upsert(&self, _: &ObjectId, _: UserFields) -> Result<User, StoreError> {
            unreachable!()
        }
        async fn delete(&self, _: &ObjectId) -> Result<Option<User>, StoreError> {
            unreachable!()
        }
    }

    #[actix_web::test]
    async fn test_health_reports_service() {
        let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store))
                .route("/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, "user-service");
        assert!(body.timestamp > 0);
    }

    #[actix_web::test]
    async fn test_unreachable_store_is_unhealthy() {
        let store: Arc<dyn UserStore> = Arc::new(UnreachableStore);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store))
                .route("/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "unhealthy");
    }
}
