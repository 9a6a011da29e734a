use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::store::StoreError;

pub const USER_NOT_FOUND: &str = "No user found.";

/// Every failure a route can produce. Handlers return `Result<_, AppError>`
/// and actix renders the error through `ResponseError`.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    InvalidRequest(String),
    NotFound(String),
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) | AppError::InvalidRequest(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }))
            }
            AppError::NotFound(msg) => {
                HttpResponse::NotFound().json(serde_json::json!({ "status": msg }))
            }
            AppError::DatabaseError(msg) => {
                HttpResponse::InternalServerError().json(serde_json::json!({ "error": msg }))
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_validation_maps_to_bad_request() {
        let (status, body) = body_json(AppError::Validation("\"phone\" is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "\"phone\" is required" }));
    }

    #[actix_web::test]
    async fn test_not_found_uses_status_field() {
        let (status, body) = body_json(AppError::NotFound(USER_NOT_FOUND.into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "status": "No user found." }));
    }

    #[actix_web::test]
    async fn test_store_error_maps_to_internal_error() {
        let err = AppError::from(StoreError::Unavailable("connection refused".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let (_, body) = body_json(err).await;
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
    }
}
