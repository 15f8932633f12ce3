//! User handlers - the five CRUD operations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::{AppError, AppResult};

use crate::api::extractors::JsonBody;
use crate::api::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Ids are opaque: anything that does not parse as a stored
/// identifier is indistinguishable from an unknown id.
fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound)
}

/// Create a new user
async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users
async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// Get a single user by ID
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.user_service.get_user(parse_id(&id)?).await?;
    Ok(Json(user))
}

/// Update a user by ID
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUser>,
) -> AppResult<Json<User>> {
    let user = state
        .user_service
        .update_user(parse_id(&id)?, payload)
        .await?;
    Ok(Json(user))
}

/// Delete a user by ID. A 204 carries no payload.
async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.user_service.delete_user(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
