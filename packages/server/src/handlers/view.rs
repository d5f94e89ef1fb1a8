use axum::Json;
use axum::extract::State;
use chrono::Utc;
use podium_common::ContestSelection;
use sea_orm::ConnectionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::contest::LeaderboardResponse;
use crate::models::session::ViewResponse;
use crate::services::contest::ContestService;
use crate::state::AppState;

/// Build what a session should display.
///
/// The leaderboard is only loaded while the selection is on the leaderboard
/// view; on the list view the caller's institute contests are returned.
pub async fn render<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    selection: ContestSelection,
) -> Result<ViewResponse, AppError> {
    let service = ContestService::new(conn);

    match selection.leaderboard_target() {
        Some(contest_id) => {
            let (_, contest) = service.find_contest_for_user(user_id, contest_id).await?;
            let ranked = service.leaderboard(contest.id).await?;
            Ok(ViewResponse::Leaderboard {
                selection,
                leaderboard: LeaderboardResponse {
                    contest: contest.into(),
                    entries: ranked.into_iter().map(Into::into).collect(),
                },
            })
        }
        None => {
            let user = service.find_user(user_id).await?;
            let contests = service.list_all_contests(user.institute_id).await?;
            Ok(ViewResponse::List {
                selection,
                contests: contests.into_iter().map(Into::into).collect(),
            })
        }
    }
}

#[utoipa::path(
    get,
    path = "/session/view",
    tag = "Session",
    operation_id = "getView",
    summary = "Render the session's current screen",
    description = "Returns the contest list, or the leaderboard of the selected contest when the session is on the leaderboard view.",
    responses(
        (status = 200, description = "Current view", body = ViewResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Selected contest no longer exists (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(session_id = %auth_user.session_id))]
pub async fn get_view(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ViewResponse>, AppError> {
    let selection = state.sessions.get(auth_user.session_id, Utc::now());
    Ok(Json(render(&state.db, auth_user.user_id, selection).await?))
}
