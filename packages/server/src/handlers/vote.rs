use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::vote::*;
use crate::services::vote::VoteService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/contests/{id}/votes",
    tag = "Votes",
    operation_id = "castVote",
    summary = "Vote for a participant",
    description = "Each user has one vote per contest. The participant must be approved for the contest and the contest must not have ended.",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = CastVoteRequest,
    responses(
        (status = 201, description = "Vote recorded", body = VoteResponse),
        (status = 400, description = "Voting closed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest or participant not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already voted (ALREADY_VOTED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, participant_id = payload.participant_id))]
pub async fn cast_vote(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<CastVoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = VoteService::new(&state.db)
        .cast_vote(auth_user.user_id, id, payload.participant_id)
        .await?;
    Ok((StatusCode::CREATED, Json(VoteResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/contests/{id}/votes/me",
    tag = "Votes",
    operation_id = "getMyVote",
    summary = "The caller's vote in a contest",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Caller's vote, null if none", body = MyVoteResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_my_vote(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MyVoteResponse>, AppError> {
    let vote = VoteService::new(&state.db)
        .my_vote(auth_user.user_id, id)
        .await?;
    Ok(Json(MyVoteResponse {
        vote: vote.map(Into::into),
    }))
}
