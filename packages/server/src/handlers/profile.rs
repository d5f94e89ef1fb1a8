use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{branch, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::profile::*;
use crate::state::AppState;

async fn load_profile<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
) -> Result<ProfileResponse, AppError> {
    let (usr, branch) = user::Entity::find_by_id(user_id)
        .find_also_related(branch::Entity)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(ProfileResponse {
        id: usr.id,
        name: usr.name,
        image: usr.image,
        gender: usr.gender,
        institute_id: usr.institute_id,
        branch: branch.map(|b| b.name),
    })
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Profile",
    operation_id = "getMe",
    summary = "Get the caller's profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(load_profile(&state.db, auth_user.user_id).await?))
}

#[utoipa::path(
    patch,
    path = "/me",
    tag = "Profile",
    operation_id = "updateMe",
    summary = "Update the caller's profile image",
    description = "Sets or clears the profile image URL. A profile image is required before requesting participation in a contest.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    validate_update_profile(&payload)?;

    if let Some(image) = payload.image {
        let usr = user::Entity::find_by_id(auth_user.user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let mut active: user::ActiveModel = usr.into();
        active.image = Set(image.map(|url| url.trim().to_string()));
        active.update(&state.db).await?;
        tracing::info!("Profile image updated");
    }

    Ok(Json(load_profile(&state.db, auth_user.user_id).await?))
}
