use axum::{
    Extension,
    extract::{Multipart, Path, State},
};
use std::sync::Arc;

use super::models::{UpdateProfileRequest, UserProfile};
use super::repository::UserRepository;
use crate::db::is_unique_violation;
use crate::gateway::error::{ApiError, ApiResult, ok};
use crate::gateway::extract::ValidatedJson;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, MessageData};
use crate::gateway::upload::{ImageBody, read_image_field};
use crate::user_auth::middleware::AuthenticatedUser;

/// Current user's profile
///
/// GET /api/v1/users/profile
#[utoipa::path(
    get,
    path = "/api/v1/users/profile",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<UserProfile>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<UserProfile> {
    let record = UserRepository::get_by_id(state.db.pool(), user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    ok(record.profile())
}

/// Update name and/or email
///
/// PUT /api/v1/users/profile
#[utoipa::path(
    put,
    path = "/api/v1/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserProfile>),
        (status = 400, description = "Invalid input or email already registered"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<UserProfile> {
    let updated = UserRepository::update_profile(
        state.db.pool(),
        user.user_id,
        req.name.as_deref(),
        req.email.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::duplicate("Email already registered")
        } else {
            ApiError::db_error(e)
        }
    })?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!(user_id = user.user_id, "Profile updated");
    ok(updated.profile())
}

/// All users (admin)
///
/// GET /api/v1/users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<UserProfile>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Vec<UserProfile>> {
    let users = UserRepository::list(state.db.pool()).await?;
    ok(users.iter().map(|u| u.profile()).collect())
}

/// Delete a user (admin)
///
/// DELETE /api/v1/users/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<MessageData>),
        (status = 404, description = "User not found"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthenticatedUser>,
    Path(user_id): Path<i64>,
) -> ApiResult<MessageData> {
    if !UserRepository::delete(state.db.pool(), user_id).await? {
        return ApiError::not_found("User not found").into_err();
    }
    tracing::info!(user_id, admin_id = admin.user_id, "User deleted");
    ok(MessageData::new("User deleted successfully"))
}

/// Upload profile photo (multipart field `photo`)
///
/// POST /api/v1/users/profile/photo
#[utoipa::path(
    post,
    path = "/api/v1/users/profile/photo",
    responses(
        (status = 200, description = "Photo stored", body = ApiResponse<UserProfile>),
        (status = 400, description = "Missing, oversized or non-image file"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> ApiResult<UserProfile> {
    let image = read_image_field(multipart, "photo", state.max_image_bytes).await?;

    let pool = state.db.pool();
    if !UserRepository::set_photo(pool, user.user_id, &image.bytes, &image.content_type).await? {
        return ApiError::not_found("User not found").into_err();
    }
    tracing::info!(
        user_id = user.user_id,
        size = image.bytes.len(),
        "Profile photo stored"
    );

    let record = UserRepository::get_by_id(pool, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    ok(record.profile())
}

/// Raw profile photo
///
/// GET /api/v1/users/{id}/photo
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/photo",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (status = 404, description = "User or photo not found")
    ),
    tag = "User"
)]
pub async fn get_photo(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<ImageBody, ApiError> {
    let photo = UserRepository::get_photo(state.db.pool(), user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?
        .ok_or_else(|| ApiError::not_found("Photo not found for this user"))?;

    Ok(photo.into())
}
