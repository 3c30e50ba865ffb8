//! User profile routes

use crate::auth::RequireIdentity;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use eventmap_shared::{ProfilePatch, PublicUser};
use uuid::Uuid;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_my_profile).patch(update_my_profile))
        .route("/:id", get(get_user))
}

/// GET /api/users/me
async fn get_my_profile(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> ApiResult<Json<PublicUser>> {
    let profile = UserService::get_user(state.users.as_ref(), identity.id).await?;
    Ok(Json(profile))
}

/// PATCH /api/users/me - Only firstname and lastname are accepted
async fn update_my_profile(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<Json<PublicUser>> {
    let profile = UserService::update_profile(state.users.as_ref(), &identity, patch).await?;
    Ok(Json(profile))
}

/// GET /api/users/:id
async fn get_user(
    State(state): State<AppState>,
    RequireIdentity(_): RequireIdentity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PublicUser>> {
    let profile = UserService::get_user(state.users.as_ref(), id).await?;
    Ok(Json(profile))
}
