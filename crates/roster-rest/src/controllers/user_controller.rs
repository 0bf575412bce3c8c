//! User management controller.

use crate::{
    responses::{user_deleted_message, user_not_found, ApiError, ApiResult, Operation},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use roster_core::UserId;
use roster_service::User;
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = User,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 200, description = "Validation or duplicate-email message", body = String, content_type = "text/plain"),
        (status = 500, description = "Unexpected failure", body = String, content_type = "text/plain")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<User>,
) -> ApiResult<Response> {
    debug!("Create user request: {}", request.email);

    let user = state
        .user_service
        .create(request)
        .await
        .map_err(|e| ApiError::new(e, Operation::Create, state.status_policy))?;

    Ok((StatusCode::CREATED, Json(user)).into_response())
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User, or a plain-text not-found message", body = User),
        (status = 500, description = "Unexpected failure", body = String, content_type = "text/plain")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> ApiResult<Response> {
    debug!("Get user request: {}", id);

    let user = state
        .user_service
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::new(e, Operation::Get, state.status_policy))?;

    Ok(match user {
        Some(user) => Json(user).into_response(),
        None => user_not_found(state.status_policy, id),
    })
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = User,
    responses(
        (status = 200, description = "Updated user, or a plain-text not-found message", body = User),
        (status = 400, description = "Validation message", body = String, content_type = "text/plain"),
        (status = 500, description = "Unexpected failure", body = String, content_type = "text/plain")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(request): Json<User>,
) -> ApiResult<Response> {
    debug!("Update user request: {}", id);

    let user = state
        .user_service
        .update(id, request)
        .await
        .map_err(|e| ApiError::new(e, Operation::Update, state.status_policy))?;

    Ok(Json(user).into_response())
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Plain-text success or not-found message", body = String, content_type = "text/plain"),
        (status = 500, description = "Unexpected failure", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> ApiResult<Response> {
    debug!("Delete user request: {}", id);

    state
        .user_service
        .delete(id)
        .await
        .map_err(|e| ApiError::new(e, Operation::Delete, state.status_policy))?;

    Ok((StatusCode::OK, user_deleted_message(id)).into_response())
}
