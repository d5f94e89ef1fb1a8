use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use podium_common::podium;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::contest::*;
use crate::services::contest::ContestService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/contests",
    tag = "Contests",
    operation_id = "listContests",
    summary = "List contests of the caller's institute",
    description = "Returns every contest of the caller's institute, soonest ending first. Users without an institute get an empty list.",
    responses(
        (status = 200, description = "List of contests", body = Vec<ContestResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 503, description = "Data store unavailable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_contests(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestResponse>>, AppError> {
    let service = ContestService::new(&state.db);
    let user = service.find_user(auth_user.user_id).await?;
    let contests = service.list_all_contests(user.institute_id).await?;
    Ok(Json(contests.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/contests/joinable",
    tag = "Contests",
    operation_id = "listJoinableContests",
    summary = "List contests the caller can still join",
    description = "Contests of the caller's institute whose category admits the caller's gender and for which the caller has not yet requested participation. Rejected and pending requests also hide a contest.",
    responses(
        (status = 200, description = "Joinable contests", body = Vec<ContestResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 503, description = "Data store unavailable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_joinable_contests(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestResponse>>, AppError> {
    let service = ContestService::new(&state.db);
    let user = service.find_user(auth_user.user_id).await?;
    let contests = service
        .list_joinable_contests(user.institute_id, user.id)
        .await?;
    Ok(Json(contests.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/contests/{id}",
    tag = "Contests",
    operation_id = "getContest",
    summary = "Get a contest by ID",
    description = "Returns 404 for contests of other institutes.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest details", body = ContestResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    let (_, contest) = ContestService::new(&state.db)
        .find_contest_for_user(auth_user.user_id, id)
        .await?;
    Ok(Json(contest.into()))
}

#[utoipa::path(
    get,
    path = "/contests/{id}/leaderboard",
    tag = "Leaderboard",
    operation_id = "getLeaderboard",
    summary = "Ranked participants of a contest",
    description = "Approved participants ordered by vote count, highest first. Ties keep the order in which participation was requested. The first three positions carry the gold, silver and bronze tiers.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Leaderboard", body = LeaderboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Data store unavailable (STORE_UNAVAILABLE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_leaderboard(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let service = ContestService::new(&state.db);
    let (_, contest) = service.find_contest_for_user(auth_user.user_id, id).await?;
    let ranked = service.leaderboard(contest.id).await?;

    Ok(Json(LeaderboardResponse {
        contest: contest.into(),
        entries: ranked.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/contests/{id}/winners",
    tag = "Leaderboard",
    operation_id = "getWinners",
    summary = "Podium of a finished contest",
    description = "The top three of the final leaderboard. Only available once the contest end date has passed.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Winners", body = WinnersResponse),
        (status = 400, description = "Contest still running (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_winners(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<WinnersResponse>, AppError> {
    let service = ContestService::new(&state.db);
    let (_, contest) = service.find_contest_for_user(auth_user.user_id, id).await?;
    if Utc::now() < contest.end_date {
        return Err(AppError::Validation(
            "Winners are announced after the contest ends".into(),
        ));
    }

    let ranked = service.leaderboard(contest.id).await?;
    Ok(Json(WinnersResponse {
        contest: contest.into(),
        winners: podium(ranked).into_iter().map(Into::into).collect(),
    }))
}
