use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "CRUD endpoints for user records stored in MongoDB.\n\n**Pagination:** `GET /api/users/paginate/{items}?page=N` skips `(page - 1) * items` users and returns at most `items`."
    ),
    paths(
        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::paginate_users,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::UserFields,
            crate::models::UserResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Create, list, paginate, read, upsert and delete users."),
        (name = "Health", description = "Health check and request metrics."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_user_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/users"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/users/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/users/paginate/{items}"));
    }
}
