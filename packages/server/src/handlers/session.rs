use axum::Json;
use axum::extract::State;
use chrono::Utc;
use podium_common::ContestSelection;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::session::SelectContestRequest;
use crate::services::contest::ContestService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/session/selection",
    tag = "Session",
    operation_id = "getSelection",
    summary = "Get the session's contest selection",
    responses(
        (status = 200, description = "Current selection", body = ContestSelection),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(session_id = %auth_user.session_id))]
pub async fn get_selection(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Json<ContestSelection> {
    Json(state.sessions.get(auth_user.session_id, Utc::now()))
}

#[utoipa::path(
    post,
    path = "/session/selection",
    tag = "Session",
    operation_id = "selectContest",
    summary = "Select a contest and show its leaderboard",
    request_body = SelectContestRequest,
    responses(
        (status = 200, description = "Updated selection", body = ContestSelection),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(session_id = %auth_user.session_id, contest_id = payload.contest_id))]
pub async fn select_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SelectContestRequest>,
) -> Result<Json<ContestSelection>, AppError> {
    let (_, contest) = ContestService::new(&state.db)
        .find_contest_for_user(auth_user.user_id, payload.contest_id)
        .await?;

    let selection = state.sessions.update(
        auth_user.session_id,
        auth_user.expires_at,
        Utc::now(),
        |s| s.select(contest.id),
    );
    Ok(Json(selection))
}

#[utoipa::path(
    post,
    path = "/session/selection/back",
    tag = "Session",
    operation_id = "goBack",
    summary = "Return to the contest list",
    description = "Switches the session back to the list view. The selected contest is kept.",
    responses(
        (status = 200, description = "Updated selection", body = ContestSelection),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(session_id = %auth_user.session_id))]
pub async fn go_back(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Json<ContestSelection> {
    Json(state.sessions.update(
        auth_user.session_id,
        auth_user.expires_at,
        Utc::now(),
        ContestSelection::go_back,
    ))
}
