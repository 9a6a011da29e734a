use actix_web::{error::InternalError, web, HttpResponse};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::models::{PageQuery, Pagination, UserFields, UserResponse};
use crate::store::UserStore;
use crate::utils::{AppError, USER_NOT_FOUND};
use crate::validation::UserSchema;

/// Mounts the user resource under `/api/users`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .app_data(json_config())
            .app_data(query_config())
            .route("", web::post().to(create_user))
            .route("", web::get().to(list_users))
            // Own prefix so a page size is never read as a user id
            .route("/paginate/{items}", web::get().to(paginate_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}

/// Malformed JSON bodies answer with the same `{"error": ...}` shape as
/// schema failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::warn!("⚠️ Rejected request body: {}", message);
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
        )
        .into()
    })
}

/// Query strings that cannot be deserialized (e.g. a repeated `page`) get
/// the same `{"error": ...}` body as bad pagination values.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️ Rejected query string: {}", err);
        AppError::InvalidRequest(err.to_string()).into()
    })
}

fn parse_user_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::InvalidRequest(format!("Invalid user id: '{}'", raw)))
}

/// POST /api/users - Cria um usuário
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserFields,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Payload failed validation"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_user(
    schema: web::Data<UserSchema>,
    store: web::Data<dyn UserStore>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let fields = schema.validate(&body)?;
    let user = store.create(fields).await?;

    log::info!("✅ User created: {}", user.id);
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// GET /api/users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users in store order", body = [UserResponse]),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(store: web::Data<dyn UserStore>) -> Result<HttpResponse, AppError> {
    let users = store.find(0, None).await?;

    log::info!("📋 GET /users - Listed {} users", users.len());

    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/users/paginate/{items}?page=N - Página de usuários
#[utoipa::path(
    get,
    path = "/api/users/paginate/{items}",
    tag = "Users",
    params(
        ("items" = i64, Path, description = "Page size"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Up to `items` users of the requested page", body = [UserResponse]),
        (status = 400, description = "Non-numeric or non-positive pagination parameters"),
        (status = 500, description = "Store failure (plain text)")
    )
)]
pub async fn paginate_users(
    store: web::Data<dyn UserStore>,
    items: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, actix_web::Error> {
    let pagination = Pagination::parse(&items, query.page.as_deref())?;

    log::info!(
        "📋 GET /users/paginate/{} - page {} (skip {})",
        pagination.items,
        pagination.page,
        pagination.skip()
    );

    match store.find(pagination.skip(), Some(pagination.limit())).await {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            Ok(HttpResponse::Ok().json(users))
        }
        // Plain-text body; the store error rides along for RequestMetrics to log
        Err(e) => Err(InternalError::from_response(
            AppError::from(e),
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Error retrieving users"),
        )
        .into()),
    }
}

/// GET /api/users/{id} - Busca um usuário
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24-char hex)")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No user with this id"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_user_id(&id)?;

    match store.find_by_id(&id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(UserResponse::from(user))),
        None => Err(AppError::NotFound(USER_NOT_FOUND.to_string())),
    }
}

/// PUT /api/users/{id} - Atualiza (ou cria) um usuário
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24-char hex)")),
    request_body = UserFields,
    responses(
        (status = 200, description = "User updated, or created when the id was unknown", body = UserResponse),
        (status = 400, description = "Payload failed validation or malformed id"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update_user(
    schema: web::Data<UserSchema>,
    store: web::Data<dyn UserStore>,
    id: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let id = parse_user_id(&id)?;
    let fields = schema.validate(&body)?;

    log::info!("🔧 PUT /users/{} - Upserting", id);

    let user = store.upsert(&id, fields).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// DELETE /api/users/{id} - Remove um usuário
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24-char hex)")),
    responses(
        (status = 200, description = "Removed user, or null when none existed", body = UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_user_id(&id)?;

    log::info!("🗑️  DELETE /users/{}", id);

    let removed = store.delete(&id).await?;
    if removed.is_none() {
        log::debug!("No user {} to delete", id);
    }

    Ok(HttpResponse::Ok().json(removed.map(UserResponse::from)))
}
